//! # Storage Module
//!
//! Handles all data persistence for Snuffle: two record collections, pets and
//! adoption applications. The domain layer depends on the traits in
//! [`traits`]; the SQLite repositories implement them.

pub mod sqlite;
pub mod traits;

pub use sqlite::{ApplicationRepository, DbConnection, PetRepository};
pub use traits::{ApplicationStorage, PetStorage};
