use chrono::DateTime;
use shared::Pet;

/// "Mar 4, 2025" for an RFC 3339 timestamp, the raw value if it does not parse.
pub fn format_date(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

pub fn age_label(age: u32) -> String {
    match age {
        0 => "Under 1 year".to_string(),
        1 => "1 year".to_string(),
        n => format!("{} years", n),
    }
}

/// One-line description of the pet an application refers to.
pub fn pet_summary(pet: Option<&Pet>) -> String {
    match pet {
        Some(pet) => format!("{} ({} {}, {})", pet.name, pet.breed, pet.pet_type, age_label(pet.age)),
        None => "This pet is no longer listed".to_string(),
    }
}
