//! OpenAI chat-completions invoker

use async_trait::async_trait;
use fewshot_core::{CoreError, InvokerMetadata, ModelInvoker, Result as CoreResult};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;

use crate::{ConfigError, OpenAiConfig};

// Internal error classification used for retry handling.
#[derive(Debug)]
enum QueryError {
    Http {
        status: StatusCode,
        body: String,
        retry_after: Option<Duration>,
    },
    Transport {
        is_timeout: bool,
        message: String,
    },
    InvalidJson {
        parse_error: String,
    },
}

impl QueryError {
    fn is_retryable(&self) -> bool {
        match self {
            QueryError::Http { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            QueryError::Transport { is_timeout, .. } => *is_timeout,
            QueryError::InvalidJson { .. } => false,
        }
    }

    fn into_core(self) -> CoreError {
        match self {
            QueryError::Http { status, body, .. } => {
                CoreError::Invocation(format!("HTTP {status}: {body}"))
            }
            QueryError::Transport { message, .. } => {
                CoreError::Invocation(format!("transport: {message}"))
            }
            QueryError::InvalidJson { parse_error } => {
                CoreError::Invocation(format!("invalid JSON response: {parse_error}"))
            }
        }
    }
}

// Replace any occurrence of the API key in a message with a marker.
fn censor_api_key(message: String, api_key: &str) -> String {
    if api_key.is_empty() {
        message
    } else {
        message.replace(api_key, "[redacted]")
    }
}

fn parse_retry_after(resp: &Response) -> Option<Duration> {
    resp.headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// ModelInvoker backed by the OpenAI chat-completions API.
///
/// Transient failures (429, 5xx, timeouts) are retried with
/// exponential backoff up to `max_retries`, honoring `Retry-After`.
/// Persistent failures surface as `CoreError::Invocation`.
#[derive(Debug)]
pub struct OpenAiInvoker {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiInvoker {
    /// Create a new invoker; validates the configuration up front.
    pub fn new(config: OpenAiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
        })
    }

    // Single attempt. No retries here; `query_with_retries` decides.
    async fn query_once(&self, request_body: &Value) -> Result<Value, QueryError> {
        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| QueryError::Transport {
                is_timeout: e.is_timeout(),
                message: censor_api_key(e.to_string(), &self.config.api_key),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(&resp);
            let body = resp.text().await.unwrap_or_default();
            return Err(QueryError::Http {
                status,
                body: censor_api_key(body, &self.config.api_key),
                retry_after,
            });
        }

        let body = resp.text().await.map_err(|e| QueryError::Transport {
            is_timeout: e.is_timeout(),
            message: censor_api_key(e.to_string(), &self.config.api_key),
        })?;
        serde_json::from_str(&body).map_err(|e| QueryError::InvalidJson {
            parse_error: e.to_string(),
        })
    }

    async fn query_with_retries(&self, request_body: &Value) -> Result<Value, CoreError> {
        let mut attempt: u32 = 0;
        loop {
            match self.query_once(request_body).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempt >= self.config.max_retries || !e.is_retryable() {
                        return Err(e.into_core());
                    }
                    let mut delay = Duration::from_millis(500) * 2u32.pow(attempt);
                    if let QueryError::Http {
                        retry_after: Some(ra),
                        ..
                    } = e
                    {
                        if ra > delay {
                            delay = ra;
                        }
                    }
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn extract_text(response: &Value) -> Result<String, CoreError> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                CoreError::Invocation("response has no choices[0].message.content".to_string())
            })
    }
}

#[async_trait]
impl ModelInvoker for OpenAiInvoker {
    async fn complete(&self, prompt: &str) -> CoreResult<String> {
        let body = self.request_body(prompt);
        let response = self.query_with_retries(&body).await?;
        Self::extract_text(&response)
    }

    fn metadata(&self) -> InvokerMetadata {
        InvokerMetadata {
            name: Some("openai".to_string()),
            model: Some(self.config.model.clone()),
            description: Some("OpenAI chat-completions invoker".to_string()),
        }
    }
}
