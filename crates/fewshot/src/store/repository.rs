use async_trait::async_trait;

use super::{ExemplarId, PromptId, Result, StoredExemplar, StoredPrompt};

/// Repository trait for prompts and their exemplars
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Create a new prompt
    async fn create(&self, prompt: StoredPrompt) -> Result<StoredPrompt>;

    /// Get a prompt by ID
    async fn get(&self, id: &PromptId) -> Result<Option<StoredPrompt>>;

    /// List all prompts
    async fn list(&self) -> Result<Vec<StoredPrompt>>;

    /// Delete a prompt and its exemplars
    async fn delete(&self, id: &PromptId) -> Result<()>;

    /// Append an exemplar to an existing prompt
    async fn add_exemplar(
        &self,
        prompt_id: &PromptId,
        exemplar: StoredExemplar,
    ) -> Result<StoredExemplar>;

    /// Replace the answer of an existing exemplar in place
    async fn update_exemplar(
        &self,
        prompt_id: &PromptId,
        exemplar_id: &ExemplarId,
        answer: String,
    ) -> Result<StoredExemplar>;

    /// List a prompt's exemplars in append order
    async fn exemplars(&self, prompt_id: &PromptId) -> Result<Vec<StoredExemplar>>;
}
