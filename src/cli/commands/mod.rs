//! CLI command implementations

pub mod ask;
pub mod build;
pub mod history;
pub mod search;
pub mod tasks;

use anyhow::{bail, Context, Result};
use std::sync::Arc;

use crate::adapters::embeddings::{HashingEmbedder, OpenAiCompatibleEmbedder};
use crate::adapters::generation::{ChatCompletionsGenerator, MockGenerator};
use crate::domain::models::Config;
use crate::domain::ports::{EmbeddingProvider, TextGenerator};
use crate::services::RagService;

/// Wire the service with HTTP collaborators, or local ones when `offline`
pub fn build_service(config: &Config, offline: bool) -> Result<RagService> {
    let dimension = config.index.dimension;

    let (embedder, generator): (Arc<dyn EmbeddingProvider>, Arc<dyn TextGenerator>) = if offline {
        (
            Arc::new(HashingEmbedder::new(dimension)),
            Arc::new(MockGenerator::echo()),
        )
    } else {
        (
            Arc::new(
                OpenAiCompatibleEmbedder::new(config.embedding.clone(), dimension)
                    .context("Failed to create embedding client")?,
            ),
            Arc::new(
                ChatCompletionsGenerator::new(config.generation.clone())
                    .context("Failed to create generation client")?,
            ),
        )
    };

    RagService::new(config, embedder, generator).context("Failed to create RAG service")
}

/// Load the persisted index, refusing to continue without one
pub async fn ensure_index(rag: &RagService) -> Result<()> {
    let loaded = rag
        .load_index()
        .await
        .context("Failed to load knowledge base")?;

    if !loaded {
        bail!("Build the knowledge base first.");
    }
    Ok(())
}
