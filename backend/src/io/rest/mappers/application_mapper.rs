use chrono::SecondsFormat;
use shared::AdoptionApplication as SharedApplication;

use super::PetMapper;
use crate::domain::models::ApplicationWithPet;

/// Mapper to convert joined domain applications to shared DTOs.
pub struct ApplicationMapper;

impl ApplicationMapper {
    pub fn to_dto(domain: ApplicationWithPet) -> SharedApplication {
        let ApplicationWithPet { application, pet } = domain;
        SharedApplication {
            id: application.id.to_string(),
            applicant_id: application.applicant_id.to_string(),
            full_name: application.full_name,
            age: application.age,
            contact_number: application.contact_number,
            address: application.address,
            residence_type: application.residence_type,
            id_proof_url: application.id_proof_url,
            household_size: application.household_size,
            has_other_pets: application.has_other_pets,
            has_kids: application.has_kids,
            pet_sleep_location: application.pet_sleep_location,
            pet_id: application.pet_id.to_string(),
            pet: pet.map(PetMapper::to_dto),
            rehomer_id: application.rehomer_id.to_string(),
            agreed_to_care: application.agreed_to_care,
            agreed_to_background_check: application.agreed_to_background_check,
            status: application.status,
            created_at: application
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: application
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_dto_list(domain: Vec<ApplicationWithPet>) -> Vec<SharedApplication> {
        domain.into_iter().map(Self::to_dto).collect()
    }
}
