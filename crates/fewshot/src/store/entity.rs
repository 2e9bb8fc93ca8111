use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Result, StoreError};

/// Prompt ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptId(Uuid);

impl PromptId {
    /// Create a new prompt ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

impl Default for PromptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exemplar ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExemplarId(Uuid);

impl ExemplarId {
    /// Create a new exemplar ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

impl Default for ExemplarId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ExemplarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored prompt: instruction prefix plus the templates used to
/// render its exemplars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrompt {
    /// Unique identifier
    pub id: PromptId,
    /// Instruction text placed before the exemplars
    pub prefix: String,
    /// Template for the novel input
    pub suffix: String,
    /// Template applied to each exemplar
    pub example_template: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl StoredPrompt {
    /// Create a new stored prompt
    pub fn new(prefix: String, suffix: String, example_template: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: PromptId::new(),
            prefix,
            suffix,
            example_template,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A stored exemplar owned by a prompt. Append order is significant
/// and preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredExemplar {
    /// Unique identifier
    pub id: ExemplarId,
    /// The question part of the pair
    pub question: String,
    /// The curated answer
    pub answer: String,
    /// When the exemplar was added
    pub added_at: String,
}

impl StoredExemplar {
    /// Create a new stored exemplar
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: ExemplarId::new(),
            question,
            answer,
            added_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
