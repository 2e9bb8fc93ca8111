//! ModelInvoker trait for fewshot-core
//!
//! The invoker is the seam to the model provider. The checker only
//! depends on this contract; credentials and model handles are the
//! implementation's own explicit configuration, never ambient state.

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends a rendered prompt to a model and returns its text completion.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Invoke the model with a single prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Optional metadata about the backing model
    fn metadata(&self) -> InvokerMetadata {
        InvokerMetadata::default()
    }
}

/// Metadata about an invoker
#[derive(Debug, Clone, Default)]
pub struct InvokerMetadata {
    /// Human-readable name of the invoker
    pub name: Option<String>,
    /// Model identifier, e.g. "gpt-4o-mini"
    pub model: Option<String>,
    /// Description of the backing provider
    pub description: Option<String>,
}

/// A boxed invoker for dynamic dispatch
pub type BoxedInvoker = Box<dyn ModelInvoker>;

/// Arc-wrapped invoker for thread-safe sharing
pub type SharedInvoker = Arc<dyn ModelInvoker>;

/// Extension trait for invoker handling
pub trait ModelInvokerExt: ModelInvoker {
    /// Convert to a shared invoker
    fn shared(self) -> SharedInvoker
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<T: ModelInvoker> ModelInvokerExt for T {}
