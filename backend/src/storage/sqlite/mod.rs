//! # SQLite Storage Module
//!
//! SQLite-backed implementations of the storage traits.
//!
//! - **connection.rs** - pool management and schema
//! - **pet_repository.rs** - pets, including the transactional delete cascade
//! - **application_repository.rs** - adoption applications and orphan cleanup

pub mod application_repository;
pub mod connection;
pub mod pet_repository;

pub use application_repository::ApplicationRepository;
pub use connection::DbConnection;
pub use pet_repository::PetRepository;
