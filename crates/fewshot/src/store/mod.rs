pub mod entity;
pub mod error;
pub mod in_memory_repository;
pub mod repository;
pub mod service;

pub use entity::{ExemplarId, PromptId, StoredExemplar, StoredPrompt};
pub use error::{Result, StoreError};
pub use in_memory_repository::InMemoryPromptRepository;
pub use repository::PromptRepository;
pub use service::PromptService;
