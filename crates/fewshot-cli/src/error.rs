//! Error types for fewshot-cli

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exemplar file error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] fewshot_openai::ConfigError),

    #[error("Core error: {0}")]
    Core(#[from] fewshot_core::CoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
