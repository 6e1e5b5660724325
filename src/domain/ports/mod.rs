//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that adapters must implement:
//! - EmbeddingProvider: text to fixed-width vectors
//! - TextGenerator: prompt to text
//!
//! The retrieval core depends only on these traits, so it can be driven by
//! deterministic stubs in tests.

pub mod embedding;
pub mod generation;

pub use embedding::EmbeddingProvider;
pub use generation::TextGenerator;
