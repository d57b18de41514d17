//! Loads demo pet listings from a JSON file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use snuffle_backend::config;
use snuffle_backend::domain::models::UserId;
use snuffle_backend::domain::SeedService;
use snuffle_backend::storage::{DbConnection, PetRepository};
use snuffle_backend::telemetry;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "snuffle-seed", about = "Insert pets from a JSON file")]
struct Args {
    /// Identity of the rehomer that will own every seeded pet
    #[arg(long)]
    rehomer_id: String,

    /// JSON array of pets
    #[arg(long)]
    file: PathBuf,

    /// Delete all existing pets (and their applications) first
    #[arg(long)]
    replace: bool,

    /// Database URL, defaults to the server's configured database
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let pets = SeedService::parse(&contents)
        .with_context(|| format!("parse {}", args.file.display()))?;

    let database_url = match args.database_url {
        Some(url) => url,
        None => config::database_url()?,
    };
    info!("Seeding {} pets into {}", pets.len(), database_url);

    let db = DbConnection::new(&database_url).await?;
    let service = SeedService::new(Arc::new(PetRepository::new(db)));
    let report = service
        .seed(&UserId::new(args.rehomer_id), pets, args.replace)
        .await?;

    info!(
        "Seed complete: inserted {}, removed {} pets and {} applications",
        report.inserted, report.removed_pets, report.removed_applications
    );
    Ok(())
}
