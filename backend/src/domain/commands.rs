//! Domain-level command types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for turning
//! multipart forms and JSON bodies into these types.

pub mod pets {
    use crate::external::Upload;

    /// Input for listing a new pet. Text fields are raw form values and are
    /// validated by the pet service.
    #[derive(Debug, Clone, Default)]
    pub struct CreatePetCommand {
        pub name: Option<String>,
        pub pet_type: Option<String>,
        pub breed: Option<String>,
        pub age: Option<String>,
        pub gender: Option<String>,
        pub size: Option<String>,
        pub location: Option<String>,
        pub description: Option<String>,
        pub image: Option<Upload>,
    }

    /// Partial update. `None` leaves a field untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdatePetCommand {
        pub name: Option<String>,
        pub pet_type: Option<String>,
        pub breed: Option<String>,
        pub age: Option<String>,
        pub gender: Option<String>,
        pub size: Option<String>,
        pub location: Option<String>,
        pub description: Option<String>,
        pub image: Option<Upload>,
    }

    /// Result of deleting a pet and its applications.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeletePetResult {
        pub deleted_applications: u64,
    }

    /// A pet read from a seed file.
    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    pub struct SeedPet {
        pub name: String,
        #[serde(rename = "type")]
        pub pet_type: String,
        pub breed: String,
        pub age: u32,
        pub gender: String,
        pub size: Option<String>,
        pub location: Option<String>,
        pub image: Option<String>,
        pub description: Option<String>,
    }
}

pub mod applications {
    use crate::external::Upload;

    /// Input for submitting an adoption application, as raw form values.
    #[derive(Debug, Clone, Default)]
    pub struct SubmitApplicationCommand {
        pub pet_id: Option<String>,
        /// Client's idea of the rehomer. Only used for a consistency warning.
        pub claimed_rehomer_id: Option<String>,
        pub full_name: Option<String>,
        pub age: Option<String>,
        pub contact_number: Option<String>,
        pub address: Option<String>,
        pub residence_type: Option<String>,
        pub household_size: Option<String>,
        pub has_other_pets: Option<String>,
        pub has_kids: Option<String>,
        pub pet_sleep_location: Option<String>,
        pub agreed_to_care: Option<String>,
        pub agreed_to_background_check: Option<String>,
        pub id_proof: Option<Upload>,
    }
}

pub mod onboarding {
    use crate::external::Upload;

    #[derive(Debug, Clone, Default)]
    pub struct OnboardingCommand {
        pub role: Option<String>,
        pub location: Option<String>,
        pub address: Option<String>,
        pub certificate: Option<Upload>,
    }
}

pub mod maintenance {
    /// Outcome of an orphan cleanup run.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CleanupReport {
        pub orphans_found: u64,
        pub deleted: u64,
        pub dry_run: bool,
    }
}
