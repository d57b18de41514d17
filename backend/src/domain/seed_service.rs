use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::domain::commands::pets::SeedPet;
use crate::domain::models::{Pet, PetId, UserId};
use crate::storage::PetStorage;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub inserted: usize,
    pub removed_pets: usize,
    pub removed_applications: u64,
}

/// Bulk loads demo listings for one rehomer
#[derive(Clone)]
pub struct SeedService {
    pets: Arc<dyn PetStorage>,
}

impl SeedService {
    pub fn new(pets: Arc<dyn PetStorage>) -> Self {
        Self { pets }
    }

    /// Parse a JSON array of pets.
    pub fn parse(contents: &str) -> Result<Vec<SeedPet>> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Insert `pets` owned by `rehomer`. With `replace`, every existing pet is
    /// deleted first, each with its applications.
    pub async fn seed(&self, rehomer: &UserId, pets: Vec<SeedPet>, replace: bool) -> Result<SeedReport> {
        if rehomer.as_str().trim().is_empty() {
            bail!("Rehomer id must not be empty");
        }

        let mut report = SeedReport {
            inserted: 0,
            removed_pets: 0,
            removed_applications: 0,
        };

        if replace {
            for pet in self.pets.list_pets().await? {
                if let Some(applications) = self.pets.delete_pet_cascade(&pet.id).await? {
                    report.removed_pets += 1;
                    report.removed_applications += applications;
                }
            }
            info!(
                "Removed {} pets and {} applications",
                report.removed_pets, report.removed_applications
            );
        }

        for seed in pets {
            let now = super::now();
            let pet = Pet {
                id: PetId::generate(),
                name: seed.name,
                pet_type: seed.pet_type,
                breed: seed.breed,
                age: seed.age,
                gender: seed.gender,
                size: seed.size,
                location: seed.location,
                image: seed.image,
                description: seed.description,
                rehomer_id: rehomer.clone(),
                created_at: now,
                updated_at: now,
            };
            self.pets.store_pet(&pet).await?;
            report.inserted += 1;
        }

        info!("Seeded {} pets for {}", report.inserted, rehomer);
        Ok(report)
    }
}
