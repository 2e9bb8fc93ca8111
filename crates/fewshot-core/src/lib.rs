//! # Fewshot Core
//!
//! Data model and consistency-checking engine for curated few-shot
//! exemplar sets. The two seams to the outside world are traits:
//! [`PromptRenderer`] turns an exemplar set plus a novel question into a
//! prompt string, and [`ModelInvoker`] sends a prompt to a model and
//! returns its completion. Everything else in this crate is pure.

pub mod checker;
pub mod error;
pub mod exemplar;
pub mod invoker;
pub mod report;
pub mod template;

pub use checker::{ConsistencyChecker, MatchPolicy};
pub use error::{CoreError, Result};
pub use exemplar::{Exemplar, ExemplarSet};
pub use invoker::{InvokerMetadata, ModelInvoker, ModelInvokerExt, SharedInvoker};
pub use report::{ComparisonResult, Outcome, Report};
pub use template::{FewShotTemplate, PromptRenderer, SharedRenderer};
