use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project configuration files
pub const CONFIG_DIR: &str = ".pdf-analyst";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PDF_ANALYST_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunk_size: {0}. Must be greater than 0")]
    InvalidChunkSize(usize),

    #[error("Invalid chunk_overlap: {overlap}. Must be less than chunk_size ({size})")]
    InvalidChunkOverlap { overlap: usize, size: usize },

    #[error("Invalid dimension: {0}. Must be greater than 0")]
    InvalidDimension(usize),

    #[error("Invalid top_k: {0}. Must be greater than 0")]
    InvalidTopK(usize),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .pdf-analyst/config.yaml
    /// 3. .pdf-analyst/local.yaml (optional local overrides)
    /// 4. Environment variables (`PDF_ANALYST_*`, nested with `__`)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load defaults, then the given file, then environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let chunking = &config.chunking;
        if chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunking.chunk_size));
        }
        if chunking.chunk_overlap >= chunking.chunk_size {
            return Err(ConfigError::InvalidChunkOverlap {
                overlap: chunking.chunk_overlap,
                size: chunking.chunk_size,
            });
        }
        if chunking.separators.iter().all(String::is_empty) {
            return Err(ConfigError::ValidationFailed(
                "chunking.separators must contain a non-empty separator".to_string(),
            ));
        }

        if config.index.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.index.dimension));
        }
        if config.index.dir.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "index.dir cannot be empty".to_string(),
            ));
        }

        for top_k in [config.retrieval.top_k, config.retrieval.task_top_k] {
            if top_k == 0 {
                return Err(ConfigError::InvalidTopK(top_k));
            }
        }

        if config.embedding.base_url.is_empty() || config.embedding.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "embedding.base_url and embedding.model cannot be empty".to_string(),
            ));
        }
        if config.embedding.max_batch_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "embedding.max_batch_size must be at least 1".to_string(),
            ));
        }

        if config.generation.base_url.is_empty() || config.generation.model.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "generation.base_url and generation.model cannot be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&config.generation.temperature) {
            return Err(ConfigError::InvalidTemperature(config.generation.temperature));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
