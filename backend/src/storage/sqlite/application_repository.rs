use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use shared::{ApplicationStatus, ResidenceType, SleepLocation};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::connection::DbConnection;
use super::pet_repository::{
    format_timestamp, parse_timestamp, pet_from_row, u32_column, PET_COLUMNS,
};
use crate::domain::models::{
    AdoptionApplication, ApplicationId, ApplicationWithPet, PetId, UserId,
};
use crate::storage::ApplicationStorage;

const APPLICATION_COLUMNS: &str = "a.id, a.applicant_id, a.full_name, a.age, a.contact_number, \
     a.address, a.residence_type, a.id_proof_url, a.household_size, a.has_other_pets, \
     a.has_kids, a.pet_sleep_location, a.pet_id, a.rehomer_id, a.agreed_to_care, \
     a.agreed_to_background_check, a.status, a.created_at, a.updated_at";

fn application_from_row(row: &SqliteRow) -> Result<AdoptionApplication> {
    let residence_type: String = row.try_get("residence_type")?;
    let pet_sleep_location: String = row.try_get("pet_sleep_location")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(AdoptionApplication {
        id: ApplicationId::new(row.try_get::<String, _>("id")?),
        applicant_id: UserId::new(row.try_get::<String, _>("applicant_id")?),
        full_name: row.try_get("full_name")?,
        age: u32_column(row, "age")?,
        contact_number: row.try_get("contact_number")?,
        address: row.try_get("address")?,
        residence_type: residence_type.parse::<ResidenceType>().map_err(|e| anyhow!(e))?,
        id_proof_url: row.try_get("id_proof_url")?,
        household_size: u32_column(row, "household_size")?,
        has_other_pets: row.try_get("has_other_pets")?,
        has_kids: row.try_get("has_kids")?,
        pet_sleep_location: pet_sleep_location
            .parse::<SleepLocation>()
            .map_err(|e| anyhow!(e))?,
        pet_id: PetId::new(row.try_get::<String, _>("pet_id")?),
        rehomer_id: UserId::new(row.try_get::<String, _>("rehomer_id")?),
        agreed_to_care: row.try_get("agreed_to_care")?,
        agreed_to_background_check: row.try_get("agreed_to_background_check")?,
        status: status.parse::<ApplicationStatus>().map_err(|e| anyhow!(e))?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn joined_from_row(row: &SqliteRow) -> Result<ApplicationWithPet> {
    Ok(ApplicationWithPet {
        application: application_from_row(row)?,
        pet: pet_from_row(row)?,
    })
}

/// Select applications LEFT JOINed with their pet; `filter` is the WHERE clause.
fn joined_query(filter: &str) -> String {
    format!(
        "SELECT {APPLICATION_COLUMNS}, {PET_COLUMNS} \
         FROM adoption_applications a LEFT JOIN pets p ON p.id = a.pet_id \
         WHERE {filter} \
         ORDER BY a.created_at DESC, a.rowid DESC"
    )
}

/// Repository for adoption application operations
#[derive(Clone)]
pub struct ApplicationRepository {
    db: DbConnection,
}

impl ApplicationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert without checking the pet. Only used to simulate rows written by
    /// older versions that could leave orphans behind.
    #[cfg(test)]
    pub(crate) async fn store_application_unchecked(
        &self,
        application: &AdoptionApplication,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO adoption_applications (
                id, applicant_id, full_name, age, contact_number, address, residence_type,
                id_proof_url, household_size, has_other_pets, has_kids, pet_sleep_location,
                pet_id, rehomer_id, agreed_to_care, agreed_to_background_check, status,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(application.id.as_str())
        .bind(application.applicant_id.as_str())
        .bind(&application.full_name)
        .bind(application.age as i64)
        .bind(&application.contact_number)
        .bind(&application.address)
        .bind(application.residence_type.as_str())
        .bind(&application.id_proof_url)
        .bind(application.household_size as i64)
        .bind(application.has_other_pets)
        .bind(application.has_kids)
        .bind(application.pet_sleep_location.as_str())
        .bind(application.pet_id.as_str())
        .bind(application.rehomer_id.as_str())
        .bind(application.agreed_to_care)
        .bind(application.agreed_to_background_check)
        .bind(application.status.as_str())
        .bind(format_timestamp(&application.created_at))
        .bind(format_timestamp(&application.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ApplicationStorage for ApplicationRepository {
    async fn store_application_for_existing_pet(
        &self,
        application: &AdoptionApplication,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO adoption_applications (
                id, applicant_id, full_name, age, contact_number, address, residence_type,
                id_proof_url, household_size, has_other_pets, has_kids, pet_sleep_location,
                pet_id, rehomer_id, agreed_to_care, agreed_to_background_check, status,
                created_at, updated_at)
            SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, p.id, p.rehomer_id, ?, ?, ?, ?, ?
            FROM pets p
            WHERE p.id = ?
            "#,
        )
        .bind(application.id.as_str())
        .bind(application.applicant_id.as_str())
        .bind(&application.full_name)
        .bind(application.age as i64)
        .bind(&application.contact_number)
        .bind(&application.address)
        .bind(application.residence_type.as_str())
        .bind(&application.id_proof_url)
        .bind(application.household_size as i64)
        .bind(application.has_other_pets)
        .bind(application.has_kids)
        .bind(application.pet_sleep_location.as_str())
        .bind(application.agreed_to_care)
        .bind(application.agreed_to_background_check)
        .bind(application.status.as_str())
        .bind(format_timestamp(&application.created_at))
        .bind(format_timestamp(&application.updated_at))
        .bind(application.pet_id.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<ApplicationWithPet>> {
        let row = sqlx::query(&joined_query("a.id = ?"))
            .bind(application_id.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(joined_from_row).transpose()
    }

    async fn list_by_applicant(&self, applicant_id: &UserId) -> Result<Vec<ApplicationWithPet>> {
        let rows = sqlx::query(&joined_query("a.applicant_id = ?"))
            .bind(applicant_id.as_str())
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(joined_from_row).collect()
    }

    async fn list_by_rehomer(&self, rehomer_id: &UserId) -> Result<Vec<ApplicationWithPet>> {
        let rows = sqlx::query(&joined_query("a.rehomer_id = ?"))
            .bind(rehomer_id.as_str())
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(joined_from_row).collect()
    }

    async fn transition_status(
        &self,
        application_id: &ApplicationId,
        expected: ApplicationStatus,
        new_status: ApplicationStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE adoption_applications
            SET status = ?, updated_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(new_status.as_str())
        .bind(format_timestamp(&Utc::now()))
        .bind(application_id.as_str())
        .bind(expected.as_str())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_orphaned_applications(&self) -> Result<u64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS orphans
            FROM adoption_applications
            WHERE pet_id NOT IN (SELECT id FROM pets)
            "#,
        )
        .fetch_one(self.db.pool())
        .await?;

        let orphans: i64 = row.try_get("orphans")?;
        Ok(orphans as u64)
    }

    async fn delete_orphaned_applications(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM adoption_applications
            WHERE pet_id NOT IN (SELECT id FROM pets)
            "#,
        )
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
