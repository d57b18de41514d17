//! Per-user profile metadata held by the identity provider.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::ProfileMetadata;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::models::UserId;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("profile api returned status {0}")]
    Status(u16),
    #[error("invalid profile api configuration: {0}")]
    InvalidConfig(String),
}

/// Reads and replaces the metadata attached to a user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Metadata for `user`. A user who never onboarded has empty metadata.
    async fn get_profile(&self, user: &UserId) -> Result<ProfileMetadata, ProfileError>;

    /// Replace the metadata for `user`.
    async fn set_profile(&self, user: &UserId, metadata: &ProfileMetadata)
        -> Result<(), ProfileError>;
}

#[derive(Debug, Deserialize)]
struct UserResource {
    #[serde(default)]
    unsafe_metadata: ProfileMetadata,
}

#[derive(Debug, Serialize)]
struct MetadataUpdate<'a> {
    unsafe_metadata: &'a ProfileMetadata,
}

/// Identity provider user API over HTTP.
///
/// `GET {base}/users/{id}` returns the user with its `unsafe_metadata`;
/// `PATCH {base}/users/{id}/metadata` replaces it.
#[derive(Clone)]
pub struct HttpProfileStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProfileStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ProfileError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ProfileError::InvalidConfig("base url is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(ProfileError::InvalidConfig("api key is empty".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn user_url(&self, user: &UserId) -> String {
        format!("{}/users/{}", self.base_url, user)
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn get_profile(&self, user: &UserId) -> Result<ProfileMetadata, ProfileError> {
        let response = self
            .client
            .get(self.user_url(user))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProfileError::Status(response.status().as_u16()));
        }
        let resource: UserResource = response.json().await?;
        Ok(resource.unsafe_metadata)
    }

    async fn set_profile(
        &self,
        user: &UserId,
        metadata: &ProfileMetadata,
    ) -> Result<(), ProfileError> {
        let response = self
            .client
            .patch(format!("{}/metadata", self.user_url(user)))
            .bearer_auth(&self.api_key)
            .json(&MetadataUpdate { unsafe_metadata: metadata })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProfileError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Process-local profile store for development and tests.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, ProfileMetadata>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user: &UserId) -> Result<ProfileMetadata, ProfileError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_profile(
        &self,
        user: &UserId,
        metadata: &ProfileMetadata,
    ) -> Result<(), ProfileError> {
        self.profiles
            .write()
            .await
            .insert(user.clone(), metadata.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    #[tokio::test]
    async fn test_in_memory_unknown_user_has_empty_metadata() {
        let store = InMemoryProfileStore::new();
        let metadata = store
            .get_profile(&UserId::new("user_new"))
            .await
            .expect("get");
        assert_eq!(metadata, ProfileMetadata::default());
    }

    #[tokio::test]
    async fn test_in_memory_set_replaces_metadata() {
        let store = InMemoryProfileStore::new();
        let user = UserId::new("user_r");
        let metadata = ProfileMetadata {
            role: Some(Role::Rehomer),
            location: Some("Austin, TX".to_string()),
            address: None,
            certificate_url: Some("http://media/cert.pdf".to_string()),
        };

        store.set_profile(&user, &metadata).await.expect("set");

        assert_eq!(store.get_profile(&user).await.expect("get"), metadata);
    }

    #[test]
    fn test_http_store_requires_configuration() {
        assert!(HttpProfileStore::new("", "key").is_err());
        assert!(HttpProfileStore::new("https://idp.example", " ").is_err());

        let store = HttpProfileStore::new("https://idp.example/v1/", "key").expect("store");
        assert_eq!(
            store.user_url(&UserId::new("user_abc")),
            "https://idp.example/v1/users/user_abc"
        );
    }

    #[test]
    fn test_user_resource_without_metadata_parses() {
        let resource: UserResource = serde_json::from_str(r#"{"id":"user_abc"}"#).expect("parse");
        assert_eq!(resource.unsafe_metadata, ProfileMetadata::default());

        let resource: UserResource = serde_json::from_str(
            r#"{"id":"user_abc","unsafe_metadata":{"role":"customer","location":"Austin"}}"#,
        )
        .expect("parse");
        assert_eq!(resource.unsafe_metadata.role, Some(Role::Customer));
    }
}
