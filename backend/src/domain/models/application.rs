use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{ApplicationStatus, ResidenceType, SleepLocation};

use super::ids::{ApplicationId, PetId, UserId};
use super::pet::Pet;

/// Domain model representing an adoption application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionApplication {
    pub id: ApplicationId,
    pub applicant_id: UserId,
    pub full_name: String,
    pub age: u32,
    pub contact_number: String,
    pub address: String,
    pub residence_type: ResidenceType,
    pub id_proof_url: String,
    pub household_size: u32,
    pub has_other_pets: bool,
    pub has_kids: bool,
    pub pet_sleep_location: SleepLocation,
    pub pet_id: PetId,
    /// Copied from the pet at submission time
    pub rehomer_id: UserId,
    pub agreed_to_care: bool,
    pub agreed_to_background_check: bool,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdoptionApplication {
    pub fn is_received_by(&self, user: &UserId) -> bool {
        &self.rehomer_id == user
    }
}

/// An application together with the current state of the pet it references.
/// `pet` is `None` when the pet has been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationWithPet {
    pub application: AdoptionApplication,
    pub pet: Option<Pet>,
}
