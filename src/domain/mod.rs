//! Domain layer for PDF Analyst
//!
//! This module contains the core records, error types and the port traits
//! implemented by the external collaborators.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ChunkingError, DomainError, DomainResult, IndexError, IndexResult};
