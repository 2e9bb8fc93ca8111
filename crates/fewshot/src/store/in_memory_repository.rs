use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    ExemplarId, PromptId, PromptRepository, Result, StoreError, StoredExemplar, StoredPrompt,
};

/// A prompt together with its exemplars, append order preserved.
#[derive(Debug, Clone)]
struct PromptRecord {
    prompt: StoredPrompt,
    exemplars: Vec<StoredExemplar>,
}

/// In-memory implementation of PromptRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromptRepository {
    data: Arc<RwLock<HashMap<PromptId, PromptRecord>>>,
}

impl InMemoryPromptRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn create(&self, prompt: StoredPrompt) -> Result<StoredPrompt> {
        let mut storage = self.data.write().await;
        storage.insert(
            prompt.id,
            PromptRecord {
                prompt: prompt.clone(),
                exemplars: Vec::new(),
            },
        );
        Ok(prompt)
    }

    async fn get(&self, id: &PromptId) -> Result<Option<StoredPrompt>> {
        let storage = self.data.read().await;
        Ok(storage.get(id).map(|r| r.prompt.clone()))
    }

    async fn list(&self) -> Result<Vec<StoredPrompt>> {
        let storage = self.data.read().await;
        let mut prompts: Vec<StoredPrompt> =
            storage.values().map(|r| r.prompt.clone()).collect();
        prompts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(prompts)
    }

    async fn delete(&self, id: &PromptId) -> Result<()> {
        let mut storage = self.data.write().await;
        if storage.remove(id).is_none() {
            return Err(StoreError::PromptNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn add_exemplar(
        &self,
        prompt_id: &PromptId,
        exemplar: StoredExemplar,
    ) -> Result<StoredExemplar> {
        let mut storage = self.data.write().await;
        let record = storage
            .get_mut(prompt_id)
            .ok_or_else(|| StoreError::PromptNotFound(prompt_id.to_string()))?;
        record.exemplars.push(exemplar.clone());
        record.prompt.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(exemplar)
    }

    async fn update_exemplar(
        &self,
        prompt_id: &PromptId,
        exemplar_id: &ExemplarId,
        answer: String,
    ) -> Result<StoredExemplar> {
        let mut storage = self.data.write().await;
        let record = storage
            .get_mut(prompt_id)
            .ok_or_else(|| StoreError::PromptNotFound(prompt_id.to_string()))?;
        let exemplar = record
            .exemplars
            .iter_mut()
            .find(|e| e.id == *exemplar_id)
            .ok_or_else(|| StoreError::ExemplarNotFound(exemplar_id.to_string()))?;
        exemplar.answer = answer;
        let exemplar = exemplar.clone();
        record.prompt.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(exemplar)
    }

    async fn exemplars(&self, prompt_id: &PromptId) -> Result<Vec<StoredExemplar>> {
        let storage = self.data.read().await;
        let record = storage
            .get(prompt_id)
            .ok_or_else(|| StoreError::PromptNotFound(prompt_id.to_string()))?;
        Ok(record.exemplars.clone())
    }
}
