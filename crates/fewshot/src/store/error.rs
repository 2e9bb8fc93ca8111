use thiserror::Error;

/// Prompt store related errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Exemplar not found: {0}")]
    ExemplarNotFound(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Core error: {0}")]
    Core(#[from] fewshot_core::CoreError),
}

/// Result type for prompt store operations
pub type Result<T> = std::result::Result<T, StoreError>;
