use std::sync::Arc;

use shared::{PetFilter, Role};
use tracing::{info, warn};

use crate::domain::commands::pets::{CreatePetCommand, DeletePetResult, UpdatePetCommand};
use crate::domain::models::{Pet, PetId, UserId};
use crate::domain::validation::{optional_text, required_count, required_text};
use crate::error::{DomainError, DomainResult};
use crate::external::{MediaFolder, MediaStore, ProfileStore};
use crate::storage::PetStorage;

/// Service for pet listings
#[derive(Clone)]
pub struct PetService {
    pets: Arc<dyn PetStorage>,
    profiles: Arc<dyn ProfileStore>,
    media: Arc<dyn MediaStore>,
}

impl PetService {
    pub fn new(
        pets: Arc<dyn PetStorage>,
        profiles: Arc<dyn ProfileStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            pets,
            profiles,
            media,
        }
    }

    /// Public catalogue, newest first, narrowed by `filter`
    pub async fn list_pets(&self, filter: &PetFilter) -> DomainResult<Vec<Pet>> {
        let pets = self.pets.list_pets().await?;
        if filter.is_empty() {
            return Ok(pets);
        }
        Ok(pets
            .into_iter()
            .filter(|p| {
                filter.matches_fields(&p.pet_type, &p.breed, p.age, p.location.as_deref())
            })
            .collect())
    }

    pub async fn list_my_pets(&self, caller: &UserId) -> DomainResult<Vec<Pet>> {
        let pets = self.pets.list_pets_by_rehomer(caller).await?;
        info!("Found {} listings for {}", pets.len(), caller);
        Ok(pets)
    }

    /// The pet, if the caller owns it. A pet owned by someone else is a 403,
    /// not a 404.
    pub async fn get_owned_pet(&self, caller: &UserId, pet_id: &PetId) -> DomainResult<Pet> {
        let pet = self
            .pets
            .get_pet(pet_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet not found"))?;

        if !pet.is_owned_by(caller) {
            warn!("{} tried to access pet {} owned by {}", caller, pet.id, pet.rehomer_id);
            return Err(DomainError::forbidden("You do not own this pet"));
        }
        Ok(pet)
    }

    pub async fn create_pet(&self, caller: &UserId, command: CreatePetCommand) -> DomainResult<Pet> {
        let profile = self.profiles.get_profile(caller).await?;
        if profile.role != Some(Role::Rehomer) {
            warn!("{} tried to list a pet without the rehomer role", caller);
            return Err(DomainError::forbidden("Only rehomers can list pets"));
        }

        let name = required_text("name", command.name.as_deref())?;
        let pet_type = required_text("type", command.pet_type.as_deref())?;
        let breed = required_text("breed", command.breed.as_deref())?;
        let age = required_count("age", command.age.as_deref())?;
        let gender = required_text("gender", command.gender.as_deref())?;
        let image = command
            .image
            .ok_or_else(|| DomainError::validation("image is required"))?;
        MediaFolder::PetImages.check(&image)?;

        let image_url = self.media.upload(MediaFolder::PetImages, &image).await?;

        let now = super::now();
        let pet = Pet {
            id: PetId::generate(),
            name,
            pet_type,
            breed,
            age,
            gender,
            size: optional_text(command.size.as_deref()),
            location: optional_text(command.location.as_deref()),
            image: Some(image_url),
            description: optional_text(command.description.as_deref()),
            rehomer_id: caller.clone(),
            created_at: now,
            updated_at: now,
        };
        self.pets.store_pet(&pet).await?;

        info!("Created pet {} ({}) for {}", pet.name, pet.id, caller);
        Ok(pet)
    }

    pub async fn update_pet(
        &self,
        caller: &UserId,
        pet_id: &PetId,
        command: UpdatePetCommand,
    ) -> DomainResult<Pet> {
        let mut pet = self.get_owned_pet(caller, pet_id).await?;

        if let Some(name) = command.name.as_deref() {
            pet.name = required_text("name", Some(name))?;
        }
        if let Some(pet_type) = command.pet_type.as_deref() {
            pet.pet_type = required_text("type", Some(pet_type))?;
        }
        if let Some(breed) = command.breed.as_deref() {
            pet.breed = required_text("breed", Some(breed))?;
        }
        if let Some(age) = command.age.as_deref() {
            pet.age = required_count("age", Some(age))?;
        }
        if let Some(gender) = command.gender.as_deref() {
            pet.gender = required_text("gender", Some(gender))?;
        }
        if let Some(size) = command.size.as_deref() {
            pet.size = optional_text(Some(size));
        }
        if let Some(location) = command.location.as_deref() {
            pet.location = optional_text(Some(location));
        }
        if let Some(description) = command.description.as_deref() {
            pet.description = optional_text(Some(description));
        }
        if let Some(image) = &command.image {
            MediaFolder::PetImages.check(image)?;
            pet.image = Some(self.media.upload(MediaFolder::PetImages, image).await?);
        }
        pet.updated_at = super::now();

        // The pet can be deleted while the image upload is in flight
        if !self.pets.update_pet(&pet).await? {
            warn!("Pet {} was deleted during update", pet.id);
            return Err(DomainError::not_found("Pet not found"));
        }

        info!("Updated pet {} ({})", pet.name, pet.id);
        Ok(pet)
    }

    /// Delete an owned pet together with every application for it.
    pub async fn delete_pet(&self, caller: &UserId, pet_id: &PetId) -> DomainResult<DeletePetResult> {
        let pet = self.get_owned_pet(caller, pet_id).await?;

        let deleted_applications = self
            .pets
            .delete_pet_cascade(&pet.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet not found"))?;

        info!(
            "Deleted pet {} ({}) and {} applications",
            pet.name, pet.id, deleted_applications
        );
        Ok(DeletePetResult {
            deleted_applications,
        })
    }
}
