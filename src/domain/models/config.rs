use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::chunk::ChunkingConfig;

/// Main configuration structure for PDF Analyst
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Vector index location and width
    #[serde(default)]
    pub index: IndexConfig,

    /// Page chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Retrieval depth configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Embedding endpoint configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Text generation endpoint configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Chat history configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Directory holding the vector blob and the metadata document
    #[serde(default = "default_index_dir")]
    pub dir: String,

    /// Width of every stored embedding
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_index_dir() -> String {
    "data/vector_index".to_string()
}

const fn default_dimension() -> usize {
    384
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dir: default_index_dir(),
            dimension: default_dimension(),
        }
    }
}

impl IndexConfig {
    /// Path of the binary vector blob
    pub fn vectors_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join("index.bin")
    }

    /// Path of the JSON metadata document
    pub fn metadata_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join("metadata.json")
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Results retrieved for a question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Results retrieved for summary, quiz and explain
    #[serde(default = "default_task_top_k")]
    pub task_top_k: usize,
}

const fn default_top_k() -> usize {
    5
}

const fn default_task_top_k() -> usize {
    8
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            task_top_k: default_task_top_k(),
        }
    }
}

/// OpenAI-compatible embedding endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Base URL of the API (without the `/embeddings` suffix)
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// API key. Falls back to `EMBEDDING_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,

    /// Maximum texts per request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_embedding_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

const fn default_embedding_timeout() -> u64 {
    60
}

const fn default_max_batch_size() -> usize {
    256
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key: None,
            timeout_secs: default_embedding_timeout(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// OpenAI-compatible chat completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Base URL of the API (without the `/chat/completions` suffix)
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    /// Chat model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API key. Falls back to `GROQ_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_generation_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_generation_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

const fn default_temperature() -> f32 {
    0.2
}

const fn default_generation_timeout() -> u64 {
    120
}

const fn default_max_tokens() -> u32 {
    2048
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            temperature: default_temperature(),
            api_key: None,
            timeout_secs: default_generation_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Chat history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryConfig {
    /// JSON file holding the conversation
    #[serde(default = "default_history_path")]
    pub path: String,
}

fn default_history_path() -> String {
    "data/chat_history/history.json".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
