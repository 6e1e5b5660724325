//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! fixed-width vectors. The retrieval core treats the model as a black box.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "openai-compatible", "hashing").
    fn name(&self) -> &'static str;

    /// Width of every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Embed texts in order. The output has the same length and order as
    /// the input.
    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>>;

    /// Embed a single text with exactly one provider call.
    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Embedding("Empty embedding response".to_string()))
    }
}
