//! Error types for fewshot-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Invocation error: {0}")]
    Invocation(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
