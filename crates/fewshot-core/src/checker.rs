//! Consistency checking for exemplar sets
//!
//! Two perturbation strategies over a curated set: **replay** probes
//! each question with the full set as context, **ablation** probes each
//! question with that exemplar held out. Either way the result is a
//! [`Report`] with one entry per exemplar, in set order.

use crate::{
    ComparisonResult, Exemplar, ExemplarSet, Outcome, Report, Result, SharedInvoker,
    SharedRenderer,
};
use strum::{Display, EnumString};

/// Comparison policy between the curated answer and the model answer.
///
/// Both sides are trimmed and a leading answer label (e.g. `"A:"`) is
/// stripped from the model output before the policy applies. The
/// baseline is exact byte equality of the cleaned strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum MatchPolicy {
    /// Exact equality of the cleaned strings (the default)
    #[default]
    Exact,
    /// Case-insensitive equality of the cleaned strings
    CaseFold,
}

impl MatchPolicy {
    /// Apply the policy to a cleaned (expected, actual) pair
    pub fn matches(&self, expected: &str, actual: &str) -> bool {
        match self {
            MatchPolicy::Exact => expected == actual,
            MatchPolicy::CaseFold => expected.to_lowercase() == actual.to_lowercase(),
        }
    }
}

/// Strip a leading answer label from a model completion and trim it.
fn clean_answer(raw: &str, label: Option<&str>) -> String {
    let trimmed = raw.trim();
    let stripped = match label {
        Some(label) if !label.is_empty() => trimmed
            .strip_prefix(label)
            .map(str::trim_start)
            .unwrap_or(trimmed),
        _ => trimmed,
    };
    stripped.to_string()
}

/// Checks whether a curated exemplar set is still consistent with live
/// model behavior.
///
/// The checker never mutates the set; each probe is independent and a
/// failing probe is recorded as [`Outcome::Failed`] without aborting
/// the rest of the report.
pub struct ConsistencyChecker {
    renderer: SharedRenderer,
    invoker: SharedInvoker,
    policy: MatchPolicy,
}

impl std::fmt::Debug for ConsistencyChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsistencyChecker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ConsistencyChecker {
    /// Create a checker with the default exact-match policy
    pub fn new(renderer: SharedRenderer, invoker: SharedInvoker) -> Self {
        Self {
            renderer,
            invoker,
            policy: MatchPolicy::default(),
        }
    }

    /// Override the comparison policy
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Render the probe prompt for `question` over `context`, invoke
    /// the model, and return the cleaned answer.
    async fn probe_answer(
        &self,
        context: &ExemplarSet,
        label: Option<&str>,
        question: &str,
    ) -> Result<String> {
        let prompt = self.renderer.render(context, question)?;
        let raw = self.invoker.complete(&prompt).await?;
        Ok(clean_answer(&raw, label))
    }

    async fn probe(
        &self,
        context: &ExemplarSet,
        label: Option<&str>,
        exemplar: &Exemplar,
    ) -> ComparisonResult {
        let expected = exemplar.answer.trim().to_string();
        let outcome = match self.probe_answer(context, label, &exemplar.question).await {
            Ok(actual) => {
                if self.policy.matches(&expected, &actual) {
                    Outcome::Match { actual }
                } else {
                    Outcome::Mismatch { actual }
                }
            }
            Err(e) => Outcome::Failed {
                error: e.to_string(),
            },
        };
        ComparisonResult {
            question: exemplar.question.clone(),
            expected,
            outcome,
        }
    }

    /// Probe every exemplar's question with the full, unmodified set as
    /// few-shot context and compare against the curated answer.
    ///
    /// Surfaces curated answers that are stale, ambiguous, or no longer
    /// reproducible.
    pub async fn replay_test(&self, set: &ExemplarSet) -> Report {
        let label = set.answer_label();
        let mut results = Vec::with_capacity(set.len());
        for exemplar in &set.examples {
            results.push(self.probe(set, label.as_deref(), exemplar).await);
        }
        Report::new(results)
    }

    /// Probe each exemplar's question with that exemplar held out, so
    /// the model answers using only the other exemplars as context.
    ///
    /// Distinguishes exemplars the model depends on from ones it can
    /// already answer without. A single-exemplar set is probed
    /// zero-shot.
    pub async fn ablation_test(&self, set: &ExemplarSet) -> Report {
        let label = set.answer_label();
        let mut results = Vec::with_capacity(set.len());
        for (index, exemplar) in set.examples.iter().enumerate() {
            let ablated = set.without(index);
            results.push(self.probe(&ablated, label.as_deref(), exemplar).await);
        }
        Report::new(results)
    }

    /// The set's exemplars with each answer replaced by a fresh replay
    /// answer. Probe failures propagate; a partially rewritten set is
    /// never returned.
    pub async fn replay_examples(&self, set: &ExemplarSet) -> Result<Vec<Exemplar>> {
        let label = set.answer_label();
        let mut rewritten = Vec::with_capacity(set.len());
        for exemplar in &set.examples {
            let answer = self
                .probe_answer(set, label.as_deref(), &exemplar.question)
                .await?;
            rewritten.push(Exemplar::new(exemplar.question.clone(), answer));
        }
        Ok(rewritten)
    }

    /// The set's exemplars with each answer replaced by the answer the
    /// model gives when that exemplar is held out.
    pub async fn ablation_examples(&self, set: &ExemplarSet) -> Result<Vec<Exemplar>> {
        let label = set.answer_label();
        let mut rewritten = Vec::with_capacity(set.len());
        for (index, exemplar) in set.examples.iter().enumerate() {
            let ablated = set.without(index);
            let answer = self
                .probe_answer(&ablated, label.as_deref(), &exemplar.question)
                .await?;
            rewritten.push(Exemplar::new(exemplar.question.clone(), answer));
        }
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreError, FewShotTemplate, ModelInvoker, ModelInvokerExt};
    use async_trait::async_trait;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    /// Answers based on the final query line of the prompt, recording
    /// every prompt it sees.
    struct ScriptedInvoker {
        answers: Vec<(&'static str, &'static str)>,
        fail_on: Option<&'static str>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedInvoker {
        fn new(answers: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                answers,
                fail_on: None,
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn fail_on(mut self, needle: &'static str) -> Self {
            self.fail_on = Some(needle);
            self
        }

        fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.prompts)
        }
    }

    #[async_trait]
    impl ModelInvoker for ScriptedInvoker {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            // the novel query is the last line of the rendered prompt
            let query = prompt.lines().last().unwrap_or_default();
            if let Some(needle) = self.fail_on {
                if query.contains(needle) {
                    return Err(CoreError::Invocation("rate limited".to_string()));
                }
            }
            for (needle, answer) in &self.answers {
                if query.contains(needle) {
                    return Ok((*answer).to_string());
                }
            }
            Ok("unknown".to_string())
        }
    }

    fn checker(invoker: ScriptedInvoker) -> ConsistencyChecker {
        ConsistencyChecker::new(FewShotTemplate::shared(), invoker.shared())
    }

    fn lifespan_set() -> ExemplarSet {
        ExemplarSet::with_examples([
            Exemplar::new(
                "Who died younger, Muhammad Ali or Alan Turing?",
                "Alan Turing 🇬🇧: 41 years old",
            ),
            Exemplar::new(
                "Who lived longer, Tina Turner or Ruby Turner?",
                "Tina Turner 🇺🇸: 100 years old",
            ),
        ])
        .prefix("Return your best guess, name/flag/age, without explanation")
    }

    #[tokio::test]
    async fn test_replay_detects_stale_answer() {
        let invoker = ScriptedInvoker::new(vec![
            ("Muhammad Ali or Alan Turing", "Alan Turing 🇬🇧: 41 years old"),
            ("Tina Turner or Ruby Turner", "Tina Turner 🇺🇸: 83 years old"),
        ]);
        let report = checker(invoker).replay_test(&lifespan_set()).await;

        assert_eq!(report.len(), 2);
        assert!(report.results()[0].outcome.matches());
        let second = &report.results()[1];
        assert_eq!(second.expected, "Tina Turner 🇺🇸: 100 years old");
        assert_eq!(
            second.outcome,
            Outcome::Mismatch {
                actual: "Tina Turner 🇺🇸: 83 years old".to_string()
            }
        );
        let diff = report.render_diff();
        assert!(diff.contains("# (identical)"));
        assert!(diff.contains("- Tina Turner 🇺🇸: 100 years old"));
        assert!(diff.contains("+ Tina Turner 🇺🇸: 83 years old"));
    }

    #[tokio::test]
    async fn test_report_follows_set_order_and_length() {
        let set = ExemplarSet::with_examples([
            Exemplar::new("alpha?", "1"),
            Exemplar::new("beta?", "2"),
            Exemplar::new("gamma?", "3"),
        ]);
        let invoker = ScriptedInvoker::new(vec![("alpha", "1"), ("beta", "2"), ("gamma", "3")]);
        let chk = checker(invoker);

        for report in [chk.replay_test(&set).await, chk.ablation_test(&set).await] {
            assert_eq!(report.len(), set.len());
            let questions: Vec<_> = report.results().iter().map(|r| r.question.clone()).collect();
            assert_eq!(questions, vec!["alpha?", "beta?", "gamma?"]);
        }
    }

    #[tokio::test]
    async fn test_replay_probes_the_question_at_each_index() {
        let set = lifespan_set();
        let invoker = ScriptedInvoker::new(vec![]);
        let prompts = invoker.prompts();
        checker(invoker).replay_test(&set).await;

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        for (prompt, exemplar) in prompts.iter().zip(&set.examples) {
            assert!(prompt.ends_with(&format!("Q: {}", exemplar.question)));
        }
    }

    #[tokio::test]
    async fn test_ablation_excludes_the_held_out_exemplar() {
        let set = ExemplarSet::with_examples([
            Exemplar::new("alpha?", "answer-alpha"),
            Exemplar::new("beta?", "answer-beta"),
            Exemplar::new("gamma?", "answer-gamma"),
        ]);
        let invoker = ScriptedInvoker::new(vec![]);
        let prompts = invoker.prompts();
        checker(invoker).ablation_test(&set).await;

        let prompts = prompts.lock().unwrap();
        for (index, (prompt, exemplar)) in prompts.iter().zip(&set.examples).enumerate() {
            // the held-out answer never appears in the probe prompt
            assert!(!prompt.contains(&exemplar.answer));
            // the question appears exactly once, as the novel query
            assert_eq!(prompt.matches(&exemplar.question).count(), 1);
            // the other exemplars remain as context
            for (other_index, other) in set.examples.iter().enumerate() {
                if other_index != index {
                    assert!(prompt.contains(&other.answer));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_ablation_of_single_exemplar_is_zero_shot() {
        let set = ExemplarSet::with_examples([Exemplar::new("alone?", "answer")])
            .prefix("Guess.");
        let invoker = ScriptedInvoker::new(vec![("alone", "answer")]);
        let prompts = invoker.prompts();
        let report = checker(invoker).ablation_test(&set).await;

        assert_eq!(report.len(), 1);
        assert!(report.is_consistent());
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts[0], "Guess.\n\nQ: alone?");
    }

    #[tokio::test]
    async fn test_invoker_failure_is_isolated_per_exemplar() {
        let set = ExemplarSet::with_examples([
            Exemplar::new("alpha?", "1"),
            Exemplar::new("beta?", "2"),
            Exemplar::new("gamma?", "wrong"),
        ]);
        let invoker = ScriptedInvoker::new(vec![("alpha", "1"), ("gamma", "3")]).fail_on("beta");
        let report = checker(invoker).replay_test(&set).await;

        assert_eq!(report.len(), 3);
        assert!(report.results()[0].outcome.matches());
        assert_eq!(
            report.results()[1].outcome,
            Outcome::Failed {
                error: "Invocation error: rate limited".to_string()
            }
        );
        assert!(matches!(
            report.results()[2].outcome,
            Outcome::Mismatch { .. }
        ));
    }

    #[tokio::test]
    async fn test_replay_is_idempotent_with_deterministic_invoker() {
        let set = lifespan_set();
        let chk = checker(ScriptedInvoker::new(vec![]));
        let first = chk.replay_test(&set).await;
        let second = chk.replay_test(&set).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_answer_label_is_stripped_before_comparison() {
        let set = ExemplarSet::with_examples([Exemplar::new("q?", "forty-two")]);
        let invoker = ScriptedInvoker::new(vec![("q?", "A: forty-two")]);
        let report = checker(invoker).replay_test(&set).await;
        assert!(report.is_consistent());
    }

    #[tokio::test]
    async fn test_case_fold_policy() {
        let set = ExemplarSet::with_examples([Exemplar::new("q?", "Forty-Two")]);
        let exact = checker(ScriptedInvoker::new(vec![("q?", "forty-two")]));
        assert!(!exact.replay_test(&set).await.is_consistent());

        let folded = checker(ScriptedInvoker::new(vec![("q?", "forty-two")]))
            .with_policy(MatchPolicy::CaseFold);
        assert!(folded.replay_test(&set).await.is_consistent());
    }

    #[tokio::test]
    async fn test_replay_examples_rewrites_answers() {
        let set = lifespan_set();
        let invoker = ScriptedInvoker::new(vec![
            ("Muhammad Ali or Alan Turing", "Alan Turing 🇬🇧: 41 years old"),
            ("Tina Turner or Ruby Turner", "Tina Turner 🇺🇸: 83 years old"),
        ]);
        let rewritten = checker(invoker).replay_examples(&set).await.unwrap();
        assert_eq!(rewritten.len(), 2);
        assert_eq!(rewritten[0].answer, "Alan Turing 🇬🇧: 41 years old");
        assert_eq!(rewritten[1].answer, "Tina Turner 🇺🇸: 83 years old");
        // questions carried over unchanged
        assert_eq!(rewritten[0].question, set.examples[0].question);
    }

    #[tokio::test]
    async fn test_rewrite_propagates_probe_failures() {
        let set = lifespan_set();
        let invoker = ScriptedInvoker::new(vec![]).fail_on("Tina");
        let err = checker(invoker).replay_examples(&set).await.unwrap_err();
        assert!(matches!(err, CoreError::Invocation(_)));
    }

    #[test]
    fn test_match_policy_string_round_trip() {
        assert_eq!(MatchPolicy::from_str("exact").unwrap(), MatchPolicy::Exact);
        assert_eq!(
            MatchPolicy::from_str("case-fold").unwrap(),
            MatchPolicy::CaseFold
        );
        assert_eq!(MatchPolicy::CaseFold.to_string(), "case-fold");
    }
}
