//! OpenAI-compatible chat completions adapter.
//!
//! Sends the assembled prompt as a single user message to
//! `{base_url}/chat/completions`. Defaults target Groq.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::TextGenerator;

/// Environment variable consulted when no API key is configured
pub const GENERATION_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Text generator for OpenAI-compatible chat completion endpoints.
pub struct ChatCompletionsGenerator {
    config: GenerationConfig,
    client: Arc<reqwest::Client>,
}

impl ChatCompletionsGenerator {
    /// Create a generator with its own HTTP client
    pub fn new(config: GenerationConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Generation(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    fn get_api_key(&self) -> DomainResult<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var(GENERATION_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DomainError::Generation(format!(
                    "API key not set. Set {GENERATION_API_KEY_ENV} or configure generation.api_key."
                ))
            })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        let api_key = self.get_api_key()?;
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "requesting chat completion"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DomainError::Generation(format!("Chat completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::Generation(format!(
                "Chat completion API returned {status}: {body}"
            )));
        }

        let result: ChatResponse = response.json().await.map_err(|e| {
            DomainError::Generation(format!("Failed to parse chat completion response: {e}"))
        })?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::Generation("Chat completion returned no choices".to_string()))
    }
}

// -- Chat completions request/response types --

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
