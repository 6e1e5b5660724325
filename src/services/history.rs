//! Chat history persistence
//!
//! The conversation is stored as a pretty-printed JSON array of
//! `{role, content}` messages. An unreadable history file is treated as an
//! empty conversation rather than an error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// When the message was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// File-backed conversation log
#[derive(Debug, Clone)]
pub struct ChatHistory {
    path: PathBuf,
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Load the history at `path`. Missing, empty or malformed files yield
    /// an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let messages = read_messages(&path);
        Self { path, messages }
    }

    /// File backing the history
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns true if no messages are stored
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message and persist immediately
    pub fn append(&mut self, role: ChatRole, content: impl Into<String>) -> Result<()> {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
            timestamp: Some(Utc::now()),
        });
        self.save()
    }

    /// Drop every message and persist the empty list
    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.save()
    }

    /// Write the history to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.messages)
            .context("Failed to serialize chat history")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write chat history to {}", self.path.display()))?;

        Ok(())
    }
}

fn read_messages(path: &Path) -> Vec<ChatMessage> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable chat history");
        Vec::new()
    })
}
