use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// OpenAI invoker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (never logged or echoed into error messages)
    pub api_key: String,

    /// Model identifier, e.g. "gpt-4o-mini"
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Overall per-request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum retries for transient failures (0 disables retrying)
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
            connect_timeout_secs: 15,
            temperature: 0.0,
            max_retries: 2,
        }
    }
}

impl OpenAiConfig {
    /// Create a config with the required fields set
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration before any request is made
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// The chat-completions endpoint for this config
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
