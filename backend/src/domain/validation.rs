//! Coercion of raw form values into typed fields.
//!
//! Multipart forms deliver every field as text. These helpers trim, require
//! and parse those values, failing with [`DomainError::Validation`].

use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Trimmed value of a field that must be present and non-blank.
pub fn required_text(field: &str, value: Option<&str>) -> DomainResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}

/// Trimmed value of an optional field; blank counts as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Non-negative whole number written as text.
pub fn parse_count(field: &str, value: &str) -> DomainResult<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        DomainError::validation(format!("{field} must be a non-negative whole number"))
    })
}

pub fn required_count(field: &str, value: Option<&str>) -> DomainResult<u32> {
    parse_count(field, &required_text(field, value)?)
}

/// Form boolean. Absent or blank yields `default`.
pub fn parse_flag(field: &str, value: Option<&str>, default: bool) -> DomainResult<bool> {
    let Some(raw) = optional_text(value) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DomainError::validation(format!(
            "{field} must be true or false"
        ))),
    }
}

/// Required field parsed with its `FromStr` implementation.
pub fn required_choice<T: FromStr>(field: &str, value: Option<&str>) -> DomainResult<T> {
    let raw = required_text(field, value)?;
    raw.parse::<T>()
        .map_err(|_| DomainError::validation(format!("{field} has an unsupported value: {raw}")))
}
