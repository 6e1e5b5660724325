//! Embedding provider adapters.

pub mod hashing;
pub mod openai_compatible;

pub use hashing::HashingEmbedder;
pub use openai_compatible::OpenAiCompatibleEmbedder;
