use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PetId, UserId};

/// Domain model representing a pet listed for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub age: u32,
    pub gender: String,
    pub size: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Owner of the listing; never changes after creation
    pub rehomer_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.rehomer_id == user
    }
}
