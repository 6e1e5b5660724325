//! Text generation port.
//!
//! The generative model is a black box `prompt -> text`. Failures are
//! fatal to the current action; implementations do not retry.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for text generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generator name (e.g., "chat-completions", "mock").
    fn name(&self) -> &'static str;

    /// Produce a completion for a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> DomainResult<String>;
}
