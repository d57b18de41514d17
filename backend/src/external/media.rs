//! Media host for uploaded files.
//!
//! Uploads land in one of three folders, each with its own allow-list of
//! formats. The store returns the public URL that is persisted on the record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Destination folder of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    PetImages,
    Certificates,
    IdProofs,
}

impl MediaFolder {
    pub fn name(&self) -> &'static str {
        match self {
            MediaFolder::PetImages => "snuffle-pets",
            MediaFolder::Certificates => "snuffle-certificates",
            MediaFolder::IdProofs => "snuffle-id-proofs",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaFolder::PetImages => &["jpg", "jpeg", "png"],
            MediaFolder::Certificates | MediaFolder::IdProofs => &["jpg", "jpeg", "png", "pdf"],
        }
    }

    /// Normalized extension for `upload`, or an error if this folder does not
    /// accept it. Checked before anything is written.
    pub fn check(&self, upload: &Upload) -> Result<String, MediaError> {
        if upload.bytes.is_empty() {
            return Err(MediaError::Empty(upload.field.clone()));
        }
        let extension = upload.extension().unwrap_or_default();
        if self.allowed_extensions().contains(&extension.as_str()) {
            Ok(extension)
        } else {
            Err(MediaError::UnsupportedFormat {
                folder: *self,
                extension,
            })
        }
    }
}

/// A file received in a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Form field the file arrived in
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Lowercase extension taken from the file name, falling back to the
    /// content type.
    pub fn extension(&self) -> Option<String> {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        if from_name.is_some() {
            return from_name;
        }
        let extension = match self.content_type.as_deref()? {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "application/pdf" => "pdf",
            _ => return None,
        };
        Some(extension.to_string())
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported file format '{extension}' for {}", folder.name())]
    UnsupportedFormat {
        folder: MediaFolder,
        extension: String,
    },
    #[error("uploaded file '{0}' is empty")]
    Empty(String),
    #[error("media storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploads and returns their public URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, folder: MediaFolder, upload: &Upload) -> Result<String, MediaError>;
}

/// Writes uploads below a local directory that the server exposes under
/// `base_url`.
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: &Path, base_url: &str) -> Result<Self, MediaError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, folder: MediaFolder, upload: &Upload) -> Result<String, MediaError> {
        let extension = folder.check(upload)?;
        let dir = self.root.join(folder.name());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;
        debug!("Stored {} bytes in {}/{}", upload.bytes.len(), folder.name(), file_name);

        Ok(format!("{}/{}/{}", self.base_url, folder.name(), file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: &str, content_type: Option<&str>) -> Upload {
        Upload {
            field: "image".to_string(),
            file_name: Some(file_name.to_string()),
            content_type: content_type.map(str::to_string),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_extension_from_name_or_content_type() {
        assert_eq!(upload("Dog.JPG", None).extension(), Some("jpg".to_string()));

        let mut nameless = upload("blob", Some("application/pdf"));
        assert_eq!(nameless.extension(), Some("pdf".to_string()));
        nameless.content_type = Some("text/plain".to_string());
        assert_eq!(nameless.extension(), None);
    }

    #[test]
    fn test_folder_allow_lists() {
        assert!(MediaFolder::PetImages.check(&upload("a.png", None)).is_ok());
        assert!(matches!(
            MediaFolder::PetImages.check(&upload("a.pdf", None)),
            Err(MediaError::UnsupportedFormat { .. })
        ));
        assert!(MediaFolder::IdProofs.check(&upload("a.pdf", None)).is_ok());
        assert!(MediaFolder::Certificates.check(&upload("a.jpeg", None)).is_ok());
        assert!(MediaFolder::Certificates.check(&upload("a.gif", None)).is_err());
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let mut empty = upload("a.png", None);
        empty.bytes.clear();
        assert!(matches!(
            MediaFolder::PetImages.check(&empty),
            Err(MediaError::Empty(_))
        ));
    }

    #[tokio::test]
    async fn test_local_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalMediaStore::new(dir.path(), "http://localhost:5001/media/")
            .expect("store");

        let url = store
            .upload(MediaFolder::PetImages, &upload("dog.png", Some("image/png")))
            .await
            .expect("upload");

        let prefix = "http://localhost:5001/media/snuffle-pets/";
        assert!(url.starts_with(prefix), "unexpected url {url}");
        assert!(url.ends_with(".png"));
        let stored = dir.path().join("snuffle-pets").join(&url[prefix.len()..]);
        assert_eq!(std::fs::read(stored).expect("read"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_local_store_rejects_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalMediaStore::new(dir.path(), "http://localhost/media").expect("store");

        let result = store
            .upload(MediaFolder::PetImages, &upload("virus.exe", None))
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join("snuffle-pets").exists());
    }
}
