use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::commands::maintenance::CleanupReport;
use crate::storage::ApplicationStorage;

/// Removes applications whose pet no longer exists
#[derive(Clone)]
pub struct MaintenanceService {
    applications: Arc<dyn ApplicationStorage>,
}

impl MaintenanceService {
    pub fn new(applications: Arc<dyn ApplicationStorage>) -> Self {
        Self { applications }
    }

    /// Delete orphaned applications, or only count them when `dry_run` is set.
    /// Running it again right after deletes nothing.
    pub async fn cleanup_orphaned_applications(&self, dry_run: bool) -> Result<CleanupReport> {
        let orphans_found = self.applications.count_orphaned_applications().await?;
        info!("Found {} orphaned applications", orphans_found);

        if dry_run || orphans_found == 0 {
            return Ok(CleanupReport {
                orphans_found,
                deleted: 0,
                dry_run,
            });
        }

        let deleted = self.applications.delete_orphaned_applications().await?;
        info!("Deleted {} orphaned applications", deleted);

        Ok(CleanupReport {
            orphans_found,
            deleted,
            dry_run,
        })
    }
}
