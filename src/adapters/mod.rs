//! Adapters implementing the domain ports against external systems.

pub mod embeddings;
pub mod generation;
