//! Text chunking domain models
//!
//! A chunk is the unit of embedding and retrieval. Each one keeps the
//! identity of the page it was cut from.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ChunkingError, DomainError, DomainResult};

/// Configuration for page chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Target maximum size of each chunk in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Trailing characters of a chunk repeated at the start of the next one
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Split points in descending priority. A hard character cut is used
    /// when none of them occurs inside the size budget.
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
}

const fn default_chunk_size() -> usize {
    800
}

const fn default_chunk_overlap() -> usize {
    100
}

fn default_separators() -> Vec<String> {
    ["\n\n", "\n", ".", " "]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separators: default_separators(),
        }
    }
}

impl ChunkingConfig {
    /// Create a configuration with the default separators
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: default_separators(),
        }
    }

    /// Validate the chunking configuration
    pub fn validate(&self) -> Result<(), ChunkingError> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::ZeroChunkSize);
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: self.chunk_overlap,
                size: self.chunk_size,
            });
        }

        if self.separators.iter().all(String::is_empty) {
            return Err(ChunkingError::NoSeparators);
        }

        Ok(())
    }
}

/// A bounded span of page text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Base name of the source file
    pub filename: String,

    /// Page the chunk was cut from (1-based)
    pub page_number: u32,

    /// The text content of this chunk
    pub content: String,
}

impl Chunk {
    /// Create a new chunk. Content must not be blank.
    pub fn new(
        filename: impl Into<String>,
        page_number: u32,
        content: impl Into<String>,
    ) -> DomainResult<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "chunk content cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            filename: filename.into(),
            page_number,
            content,
        })
    }

    /// Number of characters in the chunk
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Get a preview of the content (first 100 chars)
    pub fn preview(&self) -> String {
        if self.char_len() <= 100 {
            self.content.clone()
        } else {
            let head: String = self.content.chars().take(100).collect();
            format!("{head}...")
        }
    }
}
