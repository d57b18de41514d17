use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::connection::DbConnection;
use crate::domain::models::{Pet, PetId, UserId};
use crate::storage::PetStorage;

/// Pet columns aliased with a `p_` prefix so the same row mapper works for
/// plain pet queries and for application queries joined with pets.
pub(super) const PET_COLUMNS: &str = "p.id AS p_id, p.name AS p_name, p.pet_type AS p_pet_type, \
     p.breed AS p_breed, p.age AS p_age, p.gender AS p_gender, p.size AS p_size, \
     p.location AS p_location, p.image AS p_image, p.description AS p_description, \
     p.rehomer_id AS p_rehomer_id, p.created_at AS p_created_at, p.updated_at AS p_updated_at";

/// Fixed-width timestamps so that text ordering matches time ordering.
pub(super) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| anyhow!("Invalid stored timestamp {}: {}", value, e))?
        .with_timezone(&Utc))
}

pub(super) fn u32_column(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).map_err(|_| anyhow!("Column {} out of range: {}", column, value))
}

/// Map a row selected with [`PET_COLUMNS`]. Returns `None` when the pet side of
/// a LEFT JOIN is empty.
pub(super) fn pet_from_row(row: &SqliteRow) -> Result<Option<Pet>> {
    let id: Option<String> = row.try_get("p_id")?;
    let Some(id) = id else {
        return Ok(None);
    };
    let created_at: String = row.try_get("p_created_at")?;
    let updated_at: String = row.try_get("p_updated_at")?;

    Ok(Some(Pet {
        id: PetId::new(id),
        name: row.try_get("p_name")?,
        pet_type: row.try_get("p_pet_type")?,
        breed: row.try_get("p_breed")?,
        age: u32_column(row, "p_age")?,
        gender: row.try_get("p_gender")?,
        size: row.try_get("p_size")?,
        location: row.try_get("p_location")?,
        image: row.try_get("p_image")?,
        description: row.try_get("p_description")?,
        rehomer_id: UserId::new(row.try_get::<String, _>("p_rehomer_id")?),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    }))
}

fn pets_from_rows(rows: &[SqliteRow]) -> Result<Vec<Pet>> {
    let mut pets = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(pet) = pet_from_row(row)? {
            pets.push(pet);
        }
    }
    Ok(pets)
}

/// Repository for pet operations
#[derive(Clone)]
pub struct PetRepository {
    db: DbConnection,
}

impl PetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PetStorage for PetRepository {
    async fn store_pet(&self, pet: &Pet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pets (id, name, pet_type, breed, age, gender, size, location,
                              image, description, rehomer_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(pet.id.as_str())
        .bind(&pet.name)
        .bind(&pet.pet_type)
        .bind(&pet.breed)
        .bind(pet.age as i64)
        .bind(&pet.gender)
        .bind(&pet.size)
        .bind(&pet.location)
        .bind(&pet.image)
        .bind(&pet.description)
        .bind(pet.rehomer_id.as_str())
        .bind(format_timestamp(&pet.created_at))
        .bind(format_timestamp(&pet.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_pet(&self, pet_id: &PetId) -> Result<Option<Pet>> {
        let row = sqlx::query(&format!("SELECT {PET_COLUMNS} FROM pets p WHERE p.id = ?"))
            .bind(pet_id.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(row) => pet_from_row(&row),
            None => Ok(None),
        }
    }

    async fn list_pets(&self) -> Result<Vec<Pet>> {
        let rows = sqlx::query(&format!(
            "SELECT {PET_COLUMNS} FROM pets p ORDER BY p.created_at DESC, p.rowid DESC"
        ))
        .fetch_all(self.db.pool())
        .await?;

        pets_from_rows(&rows)
    }

    async fn list_pets_by_rehomer(&self, rehomer_id: &UserId) -> Result<Vec<Pet>> {
        let rows = sqlx::query(&format!(
            "SELECT {PET_COLUMNS} FROM pets p WHERE p.rehomer_id = ? \
             ORDER BY p.created_at DESC, p.rowid DESC"
        ))
        .bind(rehomer_id.as_str())
        .fetch_all(self.db.pool())
        .await?;

        pets_from_rows(&rows)
    }

    async fn update_pet(&self, pet: &Pet) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pets
            SET name = ?, pet_type = ?, breed = ?, age = ?, gender = ?, size = ?,
                location = ?, image = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&pet.name)
        .bind(&pet.pet_type)
        .bind(&pet.breed)
        .bind(pet.age as i64)
        .bind(&pet.gender)
        .bind(&pet.size)
        .bind(&pet.location)
        .bind(&pet.image)
        .bind(&pet.description)
        .bind(format_timestamp(&pet.updated_at))
        .bind(pet.id.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_pet_cascade(&self, pet_id: &PetId) -> Result<Option<u64>> {
        let mut tx = self.db.pool().begin().await?;

        let deleted_pets = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(pet_id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted_pets == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let deleted_applications =
            sqlx::query("DELETE FROM adoption_applications WHERE pet_id = ?")
                .bind(pet_id.as_str())
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;
        Ok(Some(deleted_applications))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_application, sample_pet};
    use crate::storage::{ApplicationRepository, ApplicationStorage};
    use chrono::Duration;

    async fn setup_test() -> (DbConnection, PetRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = PetRepository::new(db.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_store_and_get_pet() {
        let (_db, repo) = setup_test().await;
        let pet = sample_pet("Buddy", "user_r");

        repo.store_pet(&pet).await.expect("Failed to store pet");

        let loaded = repo.get_pet(&pet.id).await.expect("Failed to get pet");
        assert_eq!(loaded, Some(pet));
    }

    #[tokio::test]
    async fn test_get_missing_pet_returns_none() {
        let (_db, repo) = setup_test().await;
        let loaded = repo.get_pet(&PetId::new("missing")).await.expect("query");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_list_pets_newest_first() {
        let (_db, repo) = setup_test().await;
        let mut older = sample_pet("Lucy", "user_r");
        older.created_at = older.created_at - Duration::hours(1);
        let newer = sample_pet("Buddy", "user_r");

        repo.store_pet(&older).await.expect("store");
        repo.store_pet(&newer).await.expect("store");

        let names: Vec<String> = repo
            .list_pets()
            .await
            .expect("list")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Buddy", "Lucy"]);
    }

    #[tokio::test]
    async fn test_list_pets_by_rehomer_filters_owner() {
        let (_db, repo) = setup_test().await;
        repo.store_pet(&sample_pet("Buddy", "user_r")).await.expect("store");
        repo.store_pet(&sample_pet("Mochi", "user_other")).await.expect("store");

        let mine = repo
            .list_pets_by_rehomer(&UserId::new("user_r"))
            .await
            .expect("list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Buddy");
    }

    #[tokio::test]
    async fn test_update_pet_keeps_owner() {
        let (_db, repo) = setup_test().await;
        let mut pet = sample_pet("Buddy", "user_r");
        repo.store_pet(&pet).await.expect("store");

        pet.name = "Buddy II".to_string();
        pet.size = None;
        pet.rehomer_id = UserId::new("user_thief");
        assert!(repo.update_pet(&pet).await.expect("update"));

        let loaded = repo.get_pet(&pet.id).await.expect("get").expect("exists");
        assert_eq!(loaded.name, "Buddy II");
        assert_eq!(loaded.size, None);
        assert_eq!(loaded.rehomer_id, UserId::new("user_r"));
    }

    #[tokio::test]
    async fn test_update_missing_pet_writes_nothing() {
        let (_db, repo) = setup_test().await;
        let ghost = sample_pet("Ghost", "user_r");

        assert!(!repo.update_pet(&ghost).await.expect("update"));
        assert_eq!(repo.get_pet(&ghost.id).await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_delete_pet_cascades_to_its_applications_only() {
        let (db, repo) = setup_test().await;
        let applications = ApplicationRepository::new(db);
        let buddy = sample_pet("Buddy", "user_r");
        let lucy = sample_pet("Lucy", "user_r");
        repo.store_pet(&buddy).await.expect("store");
        repo.store_pet(&lucy).await.expect("store");

        for applicant in ["user_a", "user_b"] {
            let app = sample_application(applicant, &buddy.id);
            assert!(applications
                .store_application_for_existing_pet(&app)
                .await
                .expect("store app"));
        }
        let other = sample_application("user_a", &lucy.id);
        applications
            .store_application_for_existing_pet(&other)
            .await
            .expect("store app");

        let removed = repo.delete_pet_cascade(&buddy.id).await.expect("delete");
        assert_eq!(removed, Some(2));
        assert!(repo.get_pet(&buddy.id).await.expect("get").is_none());

        let remaining = applications
            .list_by_applicant(&UserId::new("user_a"))
            .await
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].application.pet_id, lucy.id);
    }

    #[tokio::test]
    async fn test_delete_missing_pet_returns_none() {
        let (_db, repo) = setup_test().await;
        let removed = repo
            .delete_pet_cascade(&PetId::new("missing"))
            .await
            .expect("delete");
        assert_eq!(removed, None);
    }
}
