//! Infrastructure layer module
//!
//! Concrete engines and plumbing behind the domain models:
//! - Chunking, exact vector search and index persistence
//! - PDF page extraction
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod pdf;
pub mod vector;
