//! # REST API Interface Layer
//!
//! HTTP endpoints for Snuffle, mounted under `/api`.
//!
//! - Request parsing: JSON bodies, query strings, multipart forms
//! - Authentication: the [`auth::AuthUser`] extractor
//! - Error translation: [`error::ApiError`] maps domain errors to status codes

pub mod application_apis;
pub mod auth;
pub mod error;
pub mod mappers;
pub mod multipart;
pub mod onboarding_apis;
pub mod pet_apis;
