//! # Domain Module
//!
//! Business rules for Snuffle. Services take commands built by the REST layer,
//! enforce ownership and validation, and talk to storage and external
//! services only through their traits.

use chrono::{DateTime, SubsecRound, Utc};

pub mod application_service;
pub mod commands;
pub mod maintenance_service;
pub mod models;
pub mod onboarding_service;
pub mod pet_service;
pub mod seed_service;
pub mod validation;

pub use application_service::ApplicationService;
pub use maintenance_service::MaintenanceService;
pub use onboarding_service::OnboardingService;
pub use pet_service::PetService;
pub use seed_service::{SeedReport, SeedService};

/// Current time at the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
