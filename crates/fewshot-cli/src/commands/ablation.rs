//! Ablation command handler

use crate::error::CliError;
use fewshot_core::MatchPolicy;
use std::path::Path;

use super::{build_checker, load_set};

/// Probe each exemplar's question with that exemplar held out and
/// print the diff report. Returns whether the set was consistent.
pub async fn run_ablation(
    examples: &Path,
    api_key: String,
    model: String,
    policy: MatchPolicy,
) -> Result<bool, CliError> {
    let set = load_set(examples)?;
    let checker = build_checker(api_key, model, policy)?;

    println!("Ablating {} exemplars...", set.len());
    let report = checker.ablation_test(&set).await;
    println!("\n{report}");

    if !report.is_consistent() {
        println!(
            "\n{} mismatch(es), {} failure(s)",
            report.mismatches(),
            report.failures()
        );
    }
    Ok(report.is_consistent())
}
