//! Domain errors for the retrieval core and its collaborators.

use thiserror::Error;

/// Errors raised by the vector index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Length mismatch: {vectors} vectors but {chunks} chunk records")]
    LengthMismatch { vectors: usize, chunks: usize },

    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised when chunker settings cannot make progress.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("chunk_size must be greater than 0")]
    ZeroChunkSize,

    #[error("chunk_overlap ({overlap}) must be less than chunk_size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },

    #[error("at least one non-empty separator is required")]
    NoSeparators,
}

/// Domain-level errors surfaced to the triggering user action.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Chunking(#[from] ChunkingError),
}

/// Result type for vector index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
