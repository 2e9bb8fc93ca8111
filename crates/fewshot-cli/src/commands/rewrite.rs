//! Rewrite command handler: emit the exemplar file with answers
//! replaced by fresh model answers.

use crate::error::CliError;
use fewshot_core::{ExemplarSet, MatchPolicy};
use std::path::Path;

use super::{build_checker, load_set};

/// Which probe strategy supplies the rewritten answers
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RewriteMode {
    /// Answers replayed with the full set as context
    Replay,
    /// Answers produced with each exemplar held out
    Ablation,
}

/// Probe the set and print it back as TOML with rewritten answers.
/// Any probe failure aborts; a partially rewritten set is never emitted.
pub async fn run_rewrite(
    examples: &Path,
    api_key: String,
    model: String,
    mode: RewriteMode,
) -> Result<(), CliError> {
    let set = load_set(examples)?;
    let checker = build_checker(api_key, model, MatchPolicy::Exact)?;

    let rewritten = match mode {
        RewriteMode::Replay => checker.replay_examples(&set).await?,
        RewriteMode::Ablation => checker.ablation_examples(&set).await?,
    };

    let output = ExemplarSet {
        examples: rewritten,
        ..set
    };
    print!("{}", toml::to_string_pretty(&output)?);
    Ok(())
}
