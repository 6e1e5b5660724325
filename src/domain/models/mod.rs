//! Domain models for the retrieval core

pub mod chunk;
pub mod config;
pub mod page;
pub mod search;
pub mod task_options;

pub use chunk::{Chunk, ChunkingConfig};
pub use config::{
    Config, EmbeddingConfig, GenerationConfig, HistoryConfig, IndexConfig, LoggingConfig,
    RetrievalConfig,
};
pub use page::PageRecord;
pub use search::{RetrievedContext, SearchResult};
pub use task_options::{ExplainStyle, QuizKind};
