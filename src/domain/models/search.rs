//! Retrieval result models

use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// A stored chunk returned by a nearest-neighbour query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched chunk
    pub chunk: Chunk,

    /// 1-based rank in the result list
    pub rank: usize,

    /// Squared L2 distance to the query vector
    pub distance: f32,

    /// Row of the entry inside the index
    pub position: usize,
}

/// Formatted context plus the ranked results it was built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievedContext {
    /// Labelled, separator-joined chunk blocks
    pub text: String,

    /// Results in rank order
    pub results: Vec<SearchResult>,
}

impl RetrievedContext {
    /// Returns true if nothing was retrieved
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
