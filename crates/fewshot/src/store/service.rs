use std::sync::Arc;

use fewshot_core::{Exemplar, ExemplarSet, FewShotTemplate, PromptRenderer};

use super::{
    ExemplarId, InMemoryPromptRepository, PromptId, PromptRepository, Result, StoreError,
    StoredExemplar, StoredPrompt,
};

/// Service for curating prompts and their exemplars.
///
/// Wraps a [`PromptRepository`] and assembles the core
/// [`ExemplarSet`] data model on demand.
#[derive(Clone)]
pub struct PromptService {
    repository: Arc<dyn PromptRepository>,
}

impl PromptService {
    /// Create a new PromptService
    pub fn new(repository: Arc<dyn PromptRepository>) -> Self {
        Self { repository }
    }

    /// Service backed by a fresh in-memory repository
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPromptRepository::new()))
    }

    /// Create a new prompt. `suffix` and `example_template` fall back
    /// to the core defaults when not given.
    pub async fn add_prompt(
        &self,
        prefix: String,
        suffix: Option<String>,
        example_template: Option<String>,
    ) -> Result<StoredPrompt> {
        let defaults = ExemplarSet::default();
        let prompt = StoredPrompt::new(
            prefix,
            suffix.unwrap_or(defaults.suffix),
            example_template.unwrap_or(defaults.example_template),
        );
        self.repository.create(prompt).await
    }

    /// Append an exemplar to an existing prompt
    pub async fn add_exemplar(
        &self,
        prompt_id: &PromptId,
        question: String,
        answer: String,
    ) -> Result<StoredExemplar> {
        self.repository
            .add_exemplar(prompt_id, StoredExemplar::new(question, answer))
            .await
    }

    /// Correct an exemplar's answer in place
    pub async fn correct_exemplar(
        &self,
        prompt_id: &PromptId,
        exemplar_id: &ExemplarId,
        answer: String,
    ) -> Result<StoredExemplar> {
        self.repository
            .update_exemplar(prompt_id, exemplar_id, answer)
            .await
    }

    /// Get a prompt by ID
    pub async fn get_prompt(&self, id: &PromptId) -> Result<Option<StoredPrompt>> {
        self.repository.get(id).await
    }

    /// List all prompts
    pub async fn list_prompts(&self) -> Result<Vec<StoredPrompt>> {
        self.repository.list().await
    }

    /// Delete a prompt and its exemplars
    pub async fn delete_prompt(&self, id: &PromptId) -> Result<()> {
        self.repository.delete(id).await
    }

    /// List a prompt's exemplars in append order
    pub async fn exemplars(&self, prompt_id: &PromptId) -> Result<Vec<StoredExemplar>> {
        self.repository.exemplars(prompt_id).await
    }

    /// Assemble the core [`ExemplarSet`] for a stored prompt
    pub async fn exemplar_set(&self, id: &PromptId) -> Result<ExemplarSet> {
        let prompt = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| StoreError::PromptNotFound(id.to_string()))?;
        let exemplars = self.repository.exemplars(id).await?;

        let mut set = ExemplarSet::new()
            .prefix(prompt.prefix)
            .suffix(prompt.suffix)
            .example_template(prompt.example_template);
        for exemplar in exemplars {
            set.push(Exemplar::new(exemplar.question, exemplar.answer));
        }
        Ok(set)
    }

    /// Render a stored prompt with a novel input
    pub async fn render(&self, id: &PromptId, input: &str) -> Result<String> {
        let set = self.exemplar_set(id).await?;
        Ok(FewShotTemplate::new().render(&set, input)?)
    }
}
