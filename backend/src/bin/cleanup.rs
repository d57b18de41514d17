//! Deletes adoption applications whose pet no longer exists.

use std::sync::Arc;

use clap::Parser;
use snuffle_backend::config;
use snuffle_backend::domain::MaintenanceService;
use snuffle_backend::storage::{ApplicationRepository, DbConnection};
use snuffle_backend::telemetry;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "snuffle-cleanup", about = "Remove orphaned adoption applications")]
struct Args {
    /// Database URL, defaults to the server's configured database
    #[arg(long)]
    database_url: Option<String>,

    /// Only report how many applications would be deleted
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => config::database_url()?,
    };
    info!("Starting orphan cleanup on {}", database_url);

    let db = DbConnection::new(&database_url).await?;
    let service = MaintenanceService::new(Arc::new(ApplicationRepository::new(db)));
    let report = service.cleanup_orphaned_applications(args.dry_run).await?;

    if report.dry_run {
        info!("Dry run: {} orphaned applications found", report.orphans_found);
    } else {
        info!("Cleanup complete: deleted {} orphaned applications", report.deleted);
    }
    Ok(())
}
