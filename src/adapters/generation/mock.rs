//! Mock text generator for testing and offline use.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::TextGenerator;

/// What the mock returns for each prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Return this text for every prompt
    Fixed(String),
    /// Return the prompt itself
    EchoPrompt,
    /// Fail every call with this message
    Failure(String),
}

impl Default for MockReply {
    fn default() -> Self {
        Self::Fixed("Mock answer.".to_string())
    }
}

/// Generator that replies deterministically and records every prompt.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    reply: MockReply,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockGenerator {
    /// Mock with the default fixed reply
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with the given reply behaviour
    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Always reply with `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fixed(text.into()))
    }

    /// Reply with the prompt itself
    pub fn echo() -> Self {
        Self::with_reply(MockReply::EchoPrompt)
    }

    /// Fail every call with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Failure(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }

    /// Number of generate calls so far.
    pub async fn call_count(&self) -> usize {
        self.prompts.read().await.len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        self.prompts.write().await.push(prompt.to_string());

        match &self.reply {
            MockReply::Fixed(text) => Ok(text.clone()),
            MockReply::EchoPrompt => Ok(prompt.to_string()),
            MockReply::Failure(message) => Err(DomainError::Generation(message.clone())),
        }
    }
}
