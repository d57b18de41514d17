use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pet listed for adoption, as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Species, e.g. "Dog" or "Cat"
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: String,
    /// Age in whole years
    pub age: u32,
    pub gender: String,
    pub size: Option<String>,
    pub location: Option<String>,
    /// URL of the uploaded image on the media host
    pub image: Option<String>,
    pub description: Option<String>,
    /// Identity of the rehomer who owns this listing
    pub rehomer_id: String,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

/// Lifecycle state of an adoption application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Approved" => Ok(ApplicationStatus::Approved),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("Unknown application status: {}", other)),
        }
    }
}

/// Kind of home the applicant lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidenceType {
    Hostel,
    House,
    Flat,
}

impl ResidenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidenceType::Hostel => "Hostel",
            ResidenceType::House => "House",
            ResidenceType::Flat => "Flat",
        }
    }
}

impl FromStr for ResidenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hostel" => Ok(ResidenceType::Hostel),
            "House" => Ok(ResidenceType::House),
            "Flat" => Ok(ResidenceType::Flat),
            other => Err(format!("Unknown residence type: {}", other)),
        }
    }
}

/// Where the adopted pet would sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepLocation {
    Indoors,
    Outdoors,
}

impl SleepLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepLocation::Indoors => "Indoors",
            SleepLocation::Outdoors => "Outdoors",
        }
    }
}

impl FromStr for SleepLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Indoors" => Ok(SleepLocation::Indoors),
            "Outdoors" => Ok(SleepLocation::Outdoors),
            other => Err(format!("Unknown sleep location: {}", other)),
        }
    }
}

/// An adoption application, joined with the current data of the pet it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionApplication {
    #[serde(rename = "_id")]
    pub id: String,
    pub applicant_id: String,
    pub full_name: String,
    pub age: u32,
    pub contact_number: String,
    pub address: String,
    pub residence_type: ResidenceType,
    /// URL of the uploaded identity document
    pub id_proof_url: String,
    pub household_size: u32,
    pub has_other_pets: bool,
    pub has_kids: bool,
    pub pet_sleep_location: SleepLocation,
    pub pet_id: String,
    /// Current pet data, `None` when the pet no longer exists
    pub pet: Option<Pet>,
    /// Rehomer who owned the pet when the application was submitted
    pub rehomer_id: String,
    pub agreed_to_care: bool,
    pub agreed_to_background_check: bool,
    pub status: ApplicationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `PATCH /applications/:id/status`.
///
/// The status stays a raw string so that unknown values can be rejected with
/// a validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePetResponse {
    pub message: String,
    pub deleted_applications: u64,
}

/// Role a user picks during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Rehomer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Rehomer => "rehomer",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "rehomer" => Ok(Role::Rehomer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Per-user metadata kept by the identity provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub role: Option<Role>,
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub success: bool,
    pub metadata: ProfileMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub metadata: ProfileMetadata,
}

/// JSON error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `not_found`
    pub code: String,
    /// Short human-readable message
    pub error: String,
}

/// Optional filters accepted by `GET /pets`.
///
/// Every populated field narrows the result; an empty filter matches all pets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// Inclusive upper bound on age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// Case-insensitive substring of the pet's location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl PetFilter {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.pet_type).is_none()
            && non_blank(&self.breed).is_none()
            && self.max_age.is_none()
            && non_blank(&self.location).is_none()
    }

    /// Whether a pet with these attributes passes the filter.
    pub fn matches_fields(
        &self,
        pet_type: &str,
        breed: &str,
        age: u32,
        location: Option<&str>,
    ) -> bool {
        if let Some(wanted) = non_blank(&self.pet_type) {
            if pet_type != wanted {
                return false;
            }
        }
        if let Some(wanted) = non_blank(&self.breed) {
            if breed != wanted {
                return false;
            }
        }
        if let Some(max_age) = self.max_age {
            if age > max_age {
                return false;
            }
        }
        if let Some(wanted) = non_blank(&self.location) {
            let needle = wanted.to_lowercase();
            match location {
                Some(location) if location.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        true
    }

    /// Populated parameters as `GET /pets` query pairs, unencoded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(pet_type) = non_blank(&self.pet_type) {
            pairs.push(("type", pet_type.to_string()));
        }
        if let Some(breed) = non_blank(&self.breed) {
            pairs.push(("breed", breed.to_string()));
        }
        if let Some(max_age) = self.max_age {
            pairs.push(("maxAge", max_age.to_string()));
        }
        if let Some(location) = non_blank(&self.location) {
            pairs.push(("location", location.to_string()));
        }
        pairs
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Views of the client application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavItem {
    Browse,
    Onboarding,
    MyApplications,
    MyListings,
    AdoptionRequests,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Browse => "Browse Pets",
            NavItem::Onboarding => "Get Started",
            NavItem::MyApplications => "My Applications",
            NavItem::MyListings => "My Listings",
            NavItem::AdoptionRequests => "Adoption Requests",
        }
    }
}

/// Navigation entries visible to a caller.
///
/// `signed_in` is false for anonymous visitors; `role` is `None` until the
/// user has completed onboarding.
pub fn nav_items(signed_in: bool, role: Option<Role>) -> Vec<NavItem> {
    let mut items = vec![NavItem::Browse];
    if !signed_in {
        return items;
    }
    if role.is_none() {
        items.push(NavItem::Onboarding);
    }
    items.push(NavItem::MyApplications);
    if role == Some(Role::Rehomer) {
        items.push(NavItem::MyListings);
        items.push(NavItem::AdoptionRequests);
    }
    items
}
