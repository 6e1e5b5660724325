//! OpenAI-compatible embedding adapter.
//!
//! Posts to the `/embeddings` endpoint of any server speaking the OpenAI
//! embeddings protocol (OpenAI, Ollama, vLLM, LM Studio, ...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::EmbeddingProvider;

/// Environment variable consulted when no API key is configured
pub const EMBEDDING_API_KEY_ENV: &str = "EMBEDDING_API_KEY";

/// Embedding provider for OpenAI-compatible HTTP endpoints.
pub struct OpenAiCompatibleEmbedder {
    config: EmbeddingConfig,
    dimension: usize,
    client: Arc<reqwest::Client>,
}

impl OpenAiCompatibleEmbedder {
    /// Create an embedder producing vectors of `dimension` width
    pub fn new(config: EmbeddingConfig, dimension: usize) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Embedding(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            dimension,
            client: Arc::new(client),
        })
    }

    /// API key from config, falling back to the environment. Local servers
    /// usually need none.
    fn api_key(&self) -> Option<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var(EMBEDDING_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> DomainResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let url = format!("{}/embeddings", self.config.base_url.trim_end_matches('/'));

        let request_body = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: texts,
        };

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(api_key) = self.api_key() {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Embedding API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::Embedding(format!(
                "Embedding API returned {status}: {body}"
            )));
        }

        let result: EmbeddingsResponse = response.json().await.map_err(|e| {
            DomainError::Embedding(format!("Failed to parse embedding response: {e}"))
        })?;

        if result.data.len() != expected {
            return Err(DomainError::Embedding(format!(
                "Embedding API returned {} vectors for {} inputs",
                result.data.len(),
                expected
            )));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        if let Some((position, item)) = data.iter().enumerate().find(|(i, d)| d.index != *i) {
            return Err(DomainError::Embedding(format!(
                "Embedding API returned index {} where {} was expected",
                item.index, position
            )));
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiCompatibleEmbedder {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.config.max_batch_size.max(1);
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(batch_size) {
            vectors.extend(self.call_embeddings_api(batch.to_vec()).await?);
        }

        tracing::debug!(
            model = %self.config.model,
            texts = texts.len(),
            "embedded batch"
        );

        Ok(vectors)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
