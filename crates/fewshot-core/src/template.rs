//! Prompt rendering for fewshot-core
//!
//! The [`PromptRenderer`] trait is the seam to whatever templating the
//! caller prefers; [`FewShotTemplate`] is the default implementation
//! driven entirely by the templates carried on the [`ExemplarSet`].

use crate::{CoreError, ExemplarSet, Result};
use std::sync::Arc;

/// Renders an exemplar set plus a novel input into a single prompt string.
///
/// Implementations must preserve exemplar order in the rendered text.
pub trait PromptRenderer: Send + Sync {
    /// Render a probe prompt for `input` over the given set
    fn render(&self, set: &ExemplarSet, input: &str) -> Result<String>;
}

/// Arc-wrapped renderer for thread-safe sharing
pub type SharedRenderer = Arc<dyn PromptRenderer>;

/// Default renderer: prefix, then each exemplar through the set's
/// example template, then the suffix with `{input}` substituted, all
/// joined by the set's separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewShotTemplate;

impl FewShotTemplate {
    /// Create a new template renderer
    pub fn new() -> Self {
        Self
    }

    /// Shared handle to a new template renderer
    pub fn shared() -> SharedRenderer {
        Arc::new(Self)
    }
}

impl PromptRenderer for FewShotTemplate {
    fn render(&self, set: &ExemplarSet, input: &str) -> Result<String> {
        if !set.suffix.contains("{input}") {
            return Err(CoreError::Render(
                "suffix template is missing the {input} placeholder".to_string(),
            ));
        }
        if !set.examples.is_empty() {
            for placeholder in ["{question}", "{answer}"] {
                if !set.example_template.contains(placeholder) {
                    return Err(CoreError::Render(format!(
                        "example template is missing the {placeholder} placeholder"
                    )));
                }
            }
        }

        let mut parts = Vec::with_capacity(set.examples.len() + 2);
        if !set.prefix.is_empty() {
            parts.push(set.prefix.clone());
        }
        for exemplar in &set.examples {
            parts.push(
                set.example_template
                    .replace("{question}", &exemplar.question)
                    .replace("{answer}", &exemplar.answer),
            );
        }
        parts.push(set.suffix.replace("{input}", input));

        Ok(parts.join(&set.example_separator))
    }
}
