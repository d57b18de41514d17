//! # Storage Traits
//!
//! Storage abstraction the domain layer is written against. The SQLite
//! repositories are the production implementation.

use anyhow::Result;
use async_trait::async_trait;
use shared::ApplicationStatus;

use crate::domain::models::{
    AdoptionApplication, ApplicationId, ApplicationWithPet, Pet, PetId, UserId,
};

/// Trait defining the interface for pet storage operations
#[async_trait]
pub trait PetStorage: Send + Sync {
    /// Store a new pet
    async fn store_pet(&self, pet: &Pet) -> Result<()>;

    /// Retrieve a pet by ID
    async fn get_pet(&self, pet_id: &PetId) -> Result<Option<Pet>>;

    /// List all pets, newest first
    async fn list_pets(&self) -> Result<Vec<Pet>>;

    /// List pets owned by a rehomer, newest first
    async fn list_pets_by_rehomer(&self, rehomer_id: &UserId) -> Result<Vec<Pet>>;

    /// Overwrite the mutable fields of an existing pet. The owner is not written.
    /// Returns `false` when the pet no longer exists.
    async fn update_pet(&self, pet: &Pet) -> Result<bool>;

    /// Delete a pet and every application referencing it in one transaction.
    /// Returns `None` when the pet did not exist, otherwise the number of
    /// applications removed.
    async fn delete_pet_cascade(&self, pet_id: &PetId) -> Result<Option<u64>>;
}

/// Trait defining the interface for adoption application storage operations
#[async_trait]
pub trait ApplicationStorage: Send + Sync {
    /// Insert the application only if its pet still exists. The rehomer id is
    /// copied from the pet row by the same statement, overriding whatever the
    /// caller put in `application.rehomer_id`.
    /// Returns `false` when the pet does not exist.
    async fn store_application_for_existing_pet(
        &self,
        application: &AdoptionApplication,
    ) -> Result<bool>;

    async fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<ApplicationWithPet>>;

    /// Applications submitted by an applicant, newest first, joined with pets
    async fn list_by_applicant(&self, applicant_id: &UserId) -> Result<Vec<ApplicationWithPet>>;

    /// Applications received by a rehomer, newest first, joined with pets
    async fn list_by_rehomer(&self, rehomer_id: &UserId) -> Result<Vec<ApplicationWithPet>>;

    /// Set the status of an application only if it currently has `expected`.
    /// Returns `false` when no row matched.
    async fn transition_status(
        &self,
        application_id: &ApplicationId,
        expected: ApplicationStatus,
        new_status: ApplicationStatus,
    ) -> Result<bool>;

    /// Count applications whose pet no longer exists
    async fn count_orphaned_applications(&self) -> Result<u64>;

    /// Delete applications whose pet no longer exists, returning the count
    async fn delete_orphaned_applications(&self) -> Result<u64>;
}
