//! CLI command handlers

pub mod ablation;
pub mod replay;
pub mod rewrite;

pub use ablation::run_ablation;
pub use replay::run_replay;
pub use rewrite::{RewriteMode, run_rewrite};

use crate::error::CliError;
use fewshot_core::{ConsistencyChecker, ExemplarSet, FewShotTemplate, MatchPolicy, ModelInvokerExt};
use fewshot_openai::{OpenAiConfig, OpenAiInvoker};
use std::path::Path;

/// Load an exemplar set from a TOML file. An empty set is rejected;
/// there is nothing to check.
pub fn load_set(path: &Path) -> Result<ExemplarSet, CliError> {
    let content = std::fs::read_to_string(path)?;
    let set: ExemplarSet = toml::from_str(&content)?;
    if set.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no examples in {}",
            path.display()
        )));
    }
    Ok(set)
}

/// Build a checker over the OpenAI backend. Configuration problems
/// surface here, before any probe runs.
pub fn build_checker(
    api_key: String,
    model: String,
    policy: MatchPolicy,
) -> Result<ConsistencyChecker, CliError> {
    let invoker = OpenAiInvoker::new(OpenAiConfig::new(api_key, model))?;
    Ok(ConsistencyChecker::new(FewShotTemplate::shared(), invoker.shared()).with_policy(policy))
}
