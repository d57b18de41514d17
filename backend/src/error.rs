//! Domain error taxonomy.
//!
//! Services return [`DomainError`]; the REST layer maps each variant to an
//! HTTP status. Storage keeps returning `anyhow::Result` and is folded into
//! `Upstream`.

use thiserror::Error;

use crate::external::{MediaError, ProfileError};

#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Authenticated, but not the owner/rehomer of the record
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Store or external service failure
    #[error("upstream failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnsupportedFormat { .. } | MediaError::Empty(_) => {
                DomainError::Validation(err.to_string())
            }
            other => DomainError::Upstream(anyhow::Error::new(other)),
        }
    }
}

impl From<ProfileError> for DomainError {
    fn from(err: ProfileError) -> Self {
        DomainError::Upstream(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::MediaFolder;

    #[test]
    fn test_media_format_errors_are_validation() {
        let err: DomainError = MediaError::UnsupportedFormat {
            folder: MediaFolder::PetImages,
            extension: "gif".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::Validation(_)));

        let err: DomainError = MediaError::Empty("image".to_string()).into();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_media_io_errors_are_upstream() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: DomainError = MediaError::Io(io).into();
        assert!(matches!(err, DomainError::Upstream(_)));
    }

    #[test]
    fn test_profile_errors_are_upstream() {
        let err: DomainError = ProfileError::Status(502).into();
        assert!(matches!(err, DomainError::Upstream(_)));
    }
}
