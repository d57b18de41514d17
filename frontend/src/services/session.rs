//! Bearer token kept in browser local storage.

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "snuffle.session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

impl Session {
    /// Session from a token pasted or handed over by the identity provider.
    /// Accepts an optional `Bearer ` prefix.
    pub fn from_token(raw: &str) -> Option<Self> {
        let token = raw.trim();
        let token = token
            .strip_prefix("Bearer ")
            .or_else(|| token.strip_prefix("bearer "))
            .unwrap_or(token)
            .trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }

    pub fn load() -> Option<Self> {
        LocalStorage::get(SESSION_KEY).ok()
    }

    pub fn save(&self) {
        if let Err(e) = LocalStorage::set(SESSION_KEY, self) {
            gloo::console::error!("Failed to save session:", e.to_string());
        }
    }

    pub fn clear() {
        LocalStorage::delete(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_normalization() {
        assert_eq!(
            Session::from_token("  Bearer abc.def.ghi "),
            Some(Session {
                token: "abc.def.ghi".to_string()
            })
        );
        assert_eq!(
            Session::from_token("abc"),
            Some(Session {
                token: "abc".to_string()
            })
        );
        assert_eq!(Session::from_token("   "), None);
        assert_eq!(Session::from_token("Bearer "), None);
    }
}
