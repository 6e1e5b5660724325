//! PDF Analyst - retrieval-augmented question answering over PDF documents
//!
//! Pages extracted from PDFs are split into overlapping chunks, embedded into
//! fixed-width vectors and stored in an exact L2 index that persists to disk.
//! Questions and document tasks (summary, quiz, explain) retrieve the closest
//! chunks, format them into a labelled context and hand a prompt to a text
//! generator.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): records, errors and port traits
//! - **Infrastructure Layer** (`infrastructure`): chunker, vector index,
//!   PDF extraction, configuration and logging
//! - **Adapters** (`adapters`): HTTP and offline implementations of the ports
//! - **Service Layer** (`services`): context assembly, prompts and orchestration
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pdf_analyst::adapters::embeddings::HashingEmbedder;
//! use pdf_analyst::adapters::generation::MockGenerator;
//! use pdf_analyst::{Config, RagService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let rag = RagService::new(
//!         &config,
//!         Arc::new(HashingEmbedder::new(config.index.dimension)),
//!         Arc::new(MockGenerator::echo()),
//!     )?;
//!     rag.load_index().await?;
//!     let answer = rag.answer("What is covered in chapter two?", None).await?;
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ChunkingError, DomainError, DomainResult, IndexError, IndexResult};
pub use domain::models::{
    Chunk, ChunkingConfig, Config, ExplainStyle, PageRecord, QuizKind, RetrievedContext,
    SearchResult,
};
pub use domain::ports::{EmbeddingProvider, TextGenerator};
pub use infrastructure::vector::{Chunker, IndexState, VectorIndex};
pub use services::{ContextAssembler, RagService};
