//! # Fewshot OpenAI backend
//!
//! [`ModelInvoker`](fewshot_core::ModelInvoker) implementation over the
//! OpenAI chat-completions API. Configuration is explicit: the API key
//! and model handle are constructor arguments, never read from ambient
//! process state.

pub mod config;
pub mod error;
pub mod invoker;

pub use config::OpenAiConfig;
pub use error::ConfigError;
pub use invoker::OpenAiInvoker;
