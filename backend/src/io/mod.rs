//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers turn
//! requests (JSON, multipart forms, bearer tokens) into domain commands and
//! domain results into the wire DTOs from the `shared` crate.

pub mod rest;
