//! # External Services
//!
//! Narrow interfaces to the services Snuffle does not own: the identity
//! provider (token verification and per-user profile metadata) and the media
//! host that stores uploaded files and hands back public URLs.

pub mod media;
pub mod profile_store;
pub mod token;

pub use media::{LocalMediaStore, MediaError, MediaFolder, MediaStore, Upload};
pub use profile_store::{HttpProfileStore, InMemoryProfileStore, ProfileError, ProfileStore};
pub use token::{JwtVerifier, TokenError, TokenVerifier};
