use std::sync::Arc;

use shared::{ApplicationStatus, ResidenceType, SleepLocation};
use tracing::{info, warn};

use crate::domain::commands::applications::SubmitApplicationCommand;
use crate::domain::models::{
    AdoptionApplication, ApplicationId, ApplicationWithPet, PetId, UserId,
};
use crate::domain::validation::{parse_flag, required_choice, required_count, required_text};
use crate::error::{DomainError, DomainResult};
use crate::external::{MediaFolder, MediaStore};
use crate::storage::{ApplicationStorage, PetStorage};

/// Service for adoption applications
#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationStorage>,
    pets: Arc<dyn PetStorage>,
    media: Arc<dyn MediaStore>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationStorage>,
        pets: Arc<dyn PetStorage>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            applications,
            pets,
            media,
        }
    }

    /// Submit an application for a pet. The rehomer is always taken from the
    /// pet record, never from the form.
    pub async fn submit(
        &self,
        caller: &UserId,
        command: SubmitApplicationCommand,
    ) -> DomainResult<ApplicationWithPet> {
        let pet_id = PetId::new(required_text("petId", command.pet_id.as_deref())?);
        let full_name = required_text("fullName", command.full_name.as_deref())?;
        let age = required_count("age", command.age.as_deref())?;
        let contact_number = required_text("contactNumber", command.contact_number.as_deref())?;
        let address = required_text("address", command.address.as_deref())?;
        let residence_type: ResidenceType =
            required_choice("residenceType", command.residence_type.as_deref())?;
        let household_size = required_count("householdSize", command.household_size.as_deref())?;
        let has_other_pets = parse_flag("hasOtherPets", command.has_other_pets.as_deref(), false)?;
        let has_kids = parse_flag("hasKids", command.has_kids.as_deref(), false)?;
        let pet_sleep_location: SleepLocation =
            required_choice("petSleepLocation", command.pet_sleep_location.as_deref())?;
        let agreed_to_care = parse_flag("agreedToCare", command.agreed_to_care.as_deref(), false)?;
        let agreed_to_background_check = parse_flag(
            "agreedToBackgroundCheck",
            command.agreed_to_background_check.as_deref(),
            false,
        )?;
        if !agreed_to_care || !agreed_to_background_check {
            return Err(DomainError::validation(
                "Both agreements must be accepted",
            ));
        }
        let id_proof = command
            .id_proof
            .ok_or_else(|| DomainError::validation("idProof is required"))?;
        MediaFolder::IdProofs.check(&id_proof)?;

        let pet = self
            .pets
            .get_pet(&pet_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet not found"))?;
        if let Some(claimed) = command.claimed_rehomer_id.as_deref() {
            if claimed != pet.rehomer_id.as_str() {
                warn!(
                    "Application for pet {} claimed rehomer {} but the pet belongs to {}",
                    pet.id, claimed, pet.rehomer_id
                );
            }
        }

        let id_proof_url = self.media.upload(MediaFolder::IdProofs, &id_proof).await?;

        let now = super::now();
        let application = AdoptionApplication {
            id: ApplicationId::generate(),
            applicant_id: caller.clone(),
            full_name,
            age,
            contact_number,
            address,
            residence_type,
            id_proof_url,
            household_size,
            has_other_pets,
            has_kids,
            pet_sleep_location,
            pet_id,
            rehomer_id: pet.rehomer_id.clone(),
            agreed_to_care,
            agreed_to_background_check,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        // The pet can disappear between the lookup and the insert.
        if !self
            .applications
            .store_application_for_existing_pet(&application)
            .await?
        {
            warn!("Pet {} was deleted while an application was submitted", application.pet_id);
            return Err(DomainError::not_found("Pet not found"));
        }

        info!(
            "Application {} submitted by {} for pet {}",
            application.id, caller, application.pet_id
        );
        self.load(&application.id).await
    }

    pub async fn list_mine(&self, caller: &UserId) -> DomainResult<Vec<ApplicationWithPet>> {
        Ok(self.applications.list_by_applicant(caller).await?)
    }

    pub async fn list_received(&self, caller: &UserId) -> DomainResult<Vec<ApplicationWithPet>> {
        Ok(self.applications.list_by_rehomer(caller).await?)
    }

    /// Approve or reject a pending application received by the caller.
    pub async fn update_status(
        &self,
        caller: &UserId,
        application_id: &ApplicationId,
        requested: &str,
    ) -> DomainResult<ApplicationWithPet> {
        let new_status = match requested.parse::<ApplicationStatus>() {
            Ok(status @ (ApplicationStatus::Approved | ApplicationStatus::Rejected)) => status,
            _ => {
                return Err(DomainError::validation(
                    "Status must be Approved or Rejected",
                ))
            }
        };

        let current = self.load(application_id).await?;
        if !current.application.is_received_by(caller) {
            warn!(
                "{} tried to decide application {} received by {}",
                caller, application_id, current.application.rehomer_id
            );
            return Err(DomainError::forbidden(
                "You are not the rehomer for this application",
            ));
        }
        if current.application.status != ApplicationStatus::Pending {
            return Err(DomainError::validation(format!(
                "Application is already {}",
                current.application.status
            )));
        }

        let moved = self
            .applications
            .transition_status(application_id, ApplicationStatus::Pending, new_status)
            .await?;
        if !moved {
            return Err(DomainError::validation("Application is no longer pending"));
        }

        info!("Application {} is now {}", application_id, new_status);
        self.load(application_id).await
    }

    async fn load(&self, application_id: &ApplicationId) -> DomainResult<ApplicationWithPet> {
        self.applications
            .get_application(application_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Application not found"))
    }
}
