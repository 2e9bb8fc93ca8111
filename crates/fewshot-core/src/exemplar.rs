//! Exemplar and ExemplarSet types for fewshot-core

use serde::{Deserialize, Serialize};

fn default_suffix() -> String {
    "Q: {input}".to_string()
}

fn default_example_template() -> String {
    "Q: {question}\nA: {answer}".to_string()
}

fn default_separator() -> String {
    "\n\n".to_string()
}

/// A curated (question, answer) pair used as few-shot context.
///
/// Exemplars have no identity of their own; their position in the
/// owning [`ExemplarSet`] is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    /// The question part of the pair
    pub question: String,
    /// The curated answer
    pub answer: String,
}

impl Exemplar {
    /// Create a new exemplar
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An ordered sequence of exemplars plus the templates needed to render
/// them into a single prompt.
///
/// `suffix` must contain the `{input}` placeholder for the novel
/// question; `example_template` must contain `{question}` and `{answer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExemplarSet {
    /// Instruction text placed before the exemplars
    pub prefix: String,
    /// Template for the novel input, e.g. `"Q: {input}"`
    pub suffix: String,
    /// Template applied to each exemplar
    pub example_template: String,
    /// Separator between rendered blocks
    pub example_separator: String,
    /// The exemplars, in insertion order
    pub examples: Vec<Exemplar>,
}

impl Default for ExemplarSet {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: default_suffix(),
            example_template: default_example_template(),
            example_separator: default_separator(),
            examples: Vec::new(),
        }
    }
}

impl ExemplarSet {
    /// Create an empty set with default templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from existing exemplars, keeping default templates
    pub fn with_examples(examples: impl IntoIterator<Item = Exemplar>) -> Self {
        Self {
            examples: examples.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the instruction prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the suffix template
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the per-exemplar template
    pub fn example_template(mut self, template: impl Into<String>) -> Self {
        self.example_template = template.into();
        self
    }

    /// Append an exemplar, preserving insertion order
    pub fn push(&mut self, exemplar: Exemplar) {
        self.examples.push(exemplar);
    }

    /// Number of exemplars in the set
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the set holds no exemplars
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// A copy of this set with the exemplar at `index` removed.
    ///
    /// A single-exemplar set yields an empty (zero-shot) set; that is
    /// permitted. An out-of-range index returns an unchanged copy.
    pub fn without(&self, index: usize) -> Self {
        let examples = self
            .examples
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.clone())
            .collect();
        Self {
            examples,
            ..self.clone()
        }
    }

    /// The answer label in the example template, i.e. the literal text
    /// between `{question}` and `{answer}` (typically `"A:"`).
    ///
    /// Used to strip a leading label the model may echo back. Returns
    /// `None` when the template has no such label.
    pub fn answer_label(&self) -> Option<String> {
        let after = self.example_template.split("{question}").nth(1)?;
        let label = after.split("{answer}").next()?.trim();
        if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        }
    }
}
