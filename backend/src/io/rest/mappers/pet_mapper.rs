use chrono::SecondsFormat;
use shared::Pet as SharedPet;

use crate::domain::models::Pet as DomainPet;

/// Mapper to convert domain Pet models to shared Pet DTOs.
pub struct PetMapper;

impl PetMapper {
    pub fn to_dto(domain: DomainPet) -> SharedPet {
        SharedPet {
            id: domain.id.to_string(),
            name: domain.name,
            pet_type: domain.pet_type,
            breed: domain.breed,
            age: domain.age,
            gender: domain.gender,
            size: domain.size,
            location: domain.location,
            image: domain.image,
            description: domain.description,
            rehomer_id: domain.rehomer_id.to_string(),
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: domain.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_dto_list(domain_pets: Vec<DomainPet>) -> Vec<SharedPet> {
        domain_pets.into_iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_pet;

    #[test]
    fn test_pet_serializes_with_wire_names() {
        let dto = PetMapper::to_dto(sample_pet("Buddy", "user_r"));
        let json = serde_json::to_value(&dto).expect("serialize");

        assert_eq!(json["name"], "Buddy");
        assert_eq!(json["type"], "Dog");
        assert_eq!(json["rehomerId"], "user_r");
        assert!(json["_id"].is_string());
        assert!(json["createdAt"].as_str().is_some_and(|s| s.ends_with('Z')));
    }
}
