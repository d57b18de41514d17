//! Reading `multipart/form-data` bodies into text fields and files.

use std::collections::HashMap;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::warn;

use super::error::{api_payload_too_large, api_validation_error, ApiError};
use crate::external::Upload;

/// All parts of a multipart form. A repeated field keeps its last value.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    /// Takes the extractor result so that a missing or non-multipart body is
    /// answered like any other validation failure.
    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Self, ApiError> {
        let mut multipart = multipart.map_err(|e| {
            warn!("Rejected multipart request: {}", e.body_text());
            api_validation_error("Expected a multipart/form-data body")
        })?;
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(body_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(body_error)?;

            match file_name {
                // An untouched file input arrives as an empty part with an
                // empty file name.
                Some(file_name) if file_name.is_empty() && bytes.is_empty() => {}
                Some(file_name) => {
                    form.files.insert(
                        name.clone(),
                        Upload {
                            field: name,
                            file_name: Some(file_name),
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let text = String::from_utf8(bytes.to_vec())
                        .map_err(|_| api_validation_error("Form fields must be UTF-8 text"))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}

fn body_error(err: MultipartError) -> ApiError {
    warn!("Failed to read multipart body: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        api_payload_too_large("Upload exceeds the maximum request size")
    } else {
        api_validation_error("Malformed multipart body")
    }
}
