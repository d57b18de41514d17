//! API error type and helpers.
//!
//! Every failing endpoint answers with `{"code": ..., "error": ...}` and a
//! status matching the code.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shared::ErrorResponse;

use crate::error::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            error: message.to_string(),
        },
    }
}

/// 400 with code `validation_error`
pub fn api_validation_error(message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// 401 with code `unauthorized`
pub fn api_unauthorized(message: &str) -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// 403 with code `forbidden`
pub fn api_forbidden(message: &str) -> ApiError {
    api_error(StatusCode::FORBIDDEN, "forbidden", message)
}

/// 404 with code `not_found`
pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not_found", message)
}

/// 413 with code `payload_too_large`
pub fn api_payload_too_large(message: &str) -> ApiError {
    api_error(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", message)
}

/// 500 with code `internal`. The cause is logged, never returned.
pub fn api_internal(message: &str, err: &anyhow::Error) -> ApiError {
    tracing::error!(error = ?err, "{}", message);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation(message) => api_validation_error(message),
            DomainError::Forbidden(message) => api_forbidden(message),
            DomainError::NotFound(message) => api_not_found(message),
            DomainError::Upstream(cause) => api_internal("Internal server error", cause),
        }
    }
}
