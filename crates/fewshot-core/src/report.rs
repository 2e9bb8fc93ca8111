//! Comparison results and diff-style report rendering

use std::fmt;

/// Outcome of a single probe against an exemplar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model reproduced the curated answer
    Match {
        /// The model's (cleaned) answer
        actual: String,
    },
    /// The model answered differently
    Mismatch {
        /// The model's (cleaned) answer
        actual: String,
    },
    /// Rendering or invocation failed for this exemplar only
    Failed {
        /// The error message
        error: String,
    },
}

impl Outcome {
    /// Whether the probe reproduced the curated answer
    pub fn matches(&self) -> bool {
        matches!(self, Outcome::Match { .. })
    }

    /// Whether the probe itself failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// The model's answer, if the probe completed
    pub fn actual(&self) -> Option<&str> {
        match self {
            Outcome::Match { actual } | Outcome::Mismatch { actual } => Some(actual),
            Outcome::Failed { .. } => None,
        }
    }
}

/// Per-exemplar comparison between the curated answer and a fresh
/// model answer. Transient; recomputed on every check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    /// The probed question
    pub question: String,
    /// The curated (trimmed) answer
    pub expected: String,
    /// What the probe produced
    pub outcome: Outcome,
}

impl ComparisonResult {
    fn render_diff(&self) -> String {
        let header = format!("# Q: {}", self.question);
        match &self.outcome {
            Outcome::Match { .. } => format!("{header}\n# (identical)"),
            Outcome::Mismatch { actual } => {
                format!("{header}\n- {}\n+ {}", self.expected, actual)
            }
            Outcome::Failed { error } => format!("{header}\n! error: {error}"),
        }
    }
}

/// Ordered collection of per-exemplar outcomes from one check run.
///
/// Results appear in the same order as the source exemplar set, and
/// there is exactly one result per exemplar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<ComparisonResult>,
}

impl Report {
    /// Create a report from per-exemplar results
    pub fn new(results: Vec<ComparisonResult>) -> Self {
        Self { results }
    }

    /// The per-exemplar results, in set order
    pub fn results(&self) -> &[ComparisonResult] {
        &self.results
    }

    /// Number of results (equals the source set length)
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when every probe completed and matched
    pub fn is_consistent(&self) -> bool {
        self.results.iter().all(|r| r.outcome.matches())
    }

    /// Number of mismatched answers
    pub fn mismatches(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Mismatch { .. }))
            .count()
    }

    /// Number of failed probes
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }

    /// Render the whole report as a diff-style string
    pub fn render_diff(&self) -> String {
        self.results
            .iter()
            .map(ComparisonResult::render_diff)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_diff())
    }
}

impl IntoIterator for Report {
    type Item = ComparisonResult;
    type IntoIter = std::vec::IntoIter<ComparisonResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(question: &str, expected: &str, outcome: Outcome) -> ComparisonResult {
        ComparisonResult {
            question: question.to_string(),
            expected: expected.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_match_renders_identical_marker() {
        let report = Report::new(vec![result(
            "Who?",
            "Alan Turing",
            Outcome::Match {
                actual: "Alan Turing".to_string(),
            },
        )]);
        assert_eq!(report.render_diff(), "# Q: Who?\n# (identical)");
        assert!(report.is_consistent());
    }

    #[test]
    fn test_mismatch_renders_deletion_then_addition() {
        let report = Report::new(vec![result(
            "Who lived longer, Tina Turner or Ruby Turner?",
            "Tina Turner 🇺🇸: 100 years old",
            Outcome::Mismatch {
                actual: "Tina Turner 🇺🇸: 83 years old".to_string(),
            },
        )]);
        assert_eq!(
            report.render_diff(),
            "# Q: Who lived longer, Tina Turner or Ruby Turner?\n\
             - Tina Turner 🇺🇸: 100 years old\n\
             + Tina Turner 🇺🇸: 83 years old"
        );
        assert_eq!(report.mismatches(), 1);
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_failure_renders_error_line() {
        let report = Report::new(vec![result(
            "Who?",
            "x",
            Outcome::Failed {
                error: "rate limited".to_string(),
            },
        )]);
        assert_eq!(report.render_diff(), "# Q: Who?\n! error: rate limited");
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_blocks_joined_by_blank_line() {
        let report = Report::new(vec![
            result("a?", "1", Outcome::Match { actual: "1".into() }),
            result("b?", "2", Outcome::Match { actual: "2".into() }),
        ]);
        assert_eq!(
            report.render_diff(),
            "# Q: a?\n# (identical)\n\n# Q: b?\n# (identical)"
        );
    }
}
