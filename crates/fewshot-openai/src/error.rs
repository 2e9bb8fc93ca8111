//! Error types for fewshot-openai

use thiserror::Error;

/// Configuration failures, fatal at construction time - surfaced to
/// the caller before any checks run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Missing model identifier")]
    MissingModel,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}
