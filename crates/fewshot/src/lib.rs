//! # Fewshot
//!
//! Curation layer for few-shot exemplar sets: a prompt/exemplar store
//! with a repository seam and an in-memory implementation, assembling
//! [`fewshot_core::ExemplarSet`]s for rendering and consistency checks.

pub mod store;

pub use store::{
    ExemplarId, InMemoryPromptRepository, PromptId, PromptRepository, PromptService, StoreError,
    StoredExemplar, StoredPrompt,
};
