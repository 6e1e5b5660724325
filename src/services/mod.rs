//! Service layer
//!
//! Retrieval, prompt assembly and orchestration over the domain ports.

pub mod context_assembler;
pub mod history;
pub mod prompts;
pub mod rag_service;

pub use context_assembler::{format_context, ContextAssembler};
pub use history::{ChatHistory, ChatMessage, ChatRole};
pub use rag_service::{BuildReport, RagAnswer, RagService};
