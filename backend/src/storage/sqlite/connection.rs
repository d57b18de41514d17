use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

/// DbConnection owns the SQLite pool and the schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Connect to `url`, creating the database file if needed, and make sure
    /// the schema exists.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url: {url}"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("connect to {url}"))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database. A single connection that never expires, so
    /// the data lives as long as the pool.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                pet_type TEXT NOT NULL,
                breed TEXT NOT NULL,
                age INTEGER NOT NULL CHECK (age >= 0),
                gender TEXT NOT NULL,
                size TEXT,
                location TEXT,
                image TEXT,
                description TEXT,
                rehomer_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_pets_rehomer_id
            ON pets(rehomer_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_pets_created_at
            ON pets(created_at DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // No foreign key to pets: the pet-delete cascade is explicit and the
        // maintenance job reconciles rows written by anything else.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS adoption_applications (
                id TEXT PRIMARY KEY,
                applicant_id TEXT NOT NULL,
                full_name TEXT NOT NULL,
                age INTEGER NOT NULL CHECK (age >= 0),
                contact_number TEXT NOT NULL,
                address TEXT NOT NULL,
                residence_type TEXT NOT NULL CHECK (residence_type IN ('Hostel', 'House', 'Flat')),
                id_proof_url TEXT NOT NULL,
                household_size INTEGER NOT NULL CHECK (household_size >= 0),
                has_other_pets INTEGER NOT NULL DEFAULT 0,
                has_kids INTEGER NOT NULL DEFAULT 0,
                pet_sleep_location TEXT NOT NULL CHECK (pet_sleep_location IN ('Indoors', 'Outdoors')),
                pet_id TEXT NOT NULL,
                rehomer_id TEXT NOT NULL,
                agreed_to_care INTEGER NOT NULL,
                agreed_to_background_check INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'Pending' CHECK (status IN ('Pending', 'Approved', 'Rejected')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_applications_applicant_id
            ON adoption_applications(applicant_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_applications_rehomer_id
            ON adoption_applications(rehomer_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_applications_pet_id
            ON adoption_applications(pet_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
