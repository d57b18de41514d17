use std::sync::Arc;

use shared::{ProfileMetadata, Role};
use tracing::info;

use crate::domain::commands::onboarding::OnboardingCommand;
use crate::domain::models::UserId;
use crate::domain::validation::{optional_text, required_choice, required_text};
use crate::error::{DomainError, DomainResult};
use crate::external::{MediaFolder, MediaStore, ProfileStore};

/// Records the role a user picks when they first sign in
#[derive(Clone)]
pub struct OnboardingService {
    profiles: Arc<dyn ProfileStore>,
    media: Arc<dyn MediaStore>,
}

impl OnboardingService {
    pub fn new(profiles: Arc<dyn ProfileStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { profiles, media }
    }

    pub async fn get_profile(&self, caller: &UserId) -> DomainResult<ProfileMetadata> {
        Ok(self.profiles.get_profile(caller).await?)
    }

    /// Store role and location. Rehomers must also upload a certificate; their
    /// address and certificate URL are kept alongside.
    pub async fn complete(
        &self,
        caller: &UserId,
        command: OnboardingCommand,
    ) -> DomainResult<ProfileMetadata> {
        let role: Role = required_choice("role", command.role.as_deref())?;
        let location = required_text("location", command.location.as_deref())?;

        let metadata = match role {
            Role::Customer => ProfileMetadata {
                role: Some(role),
                location: Some(location),
                address: None,
                certificate_url: None,
            },
            Role::Rehomer => {
                let certificate = command.certificate.ok_or_else(|| {
                    DomainError::validation("certificate is required for rehomers")
                })?;
                MediaFolder::Certificates.check(&certificate)?;
                let certificate_url = self
                    .media
                    .upload(MediaFolder::Certificates, &certificate)
                    .await?;
                ProfileMetadata {
                    role: Some(role),
                    location: Some(location),
                    address: optional_text(command.address.as_deref()),
                    certificate_url: Some(certificate_url),
                }
            }
        };

        self.profiles.set_profile(caller, &metadata).await?;

        info!("{} onboarded as {}", caller, role.as_str());
        Ok(metadata)
    }
}
