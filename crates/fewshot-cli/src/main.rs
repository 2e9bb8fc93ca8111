//! CLI for replay and ablation consistency checks

use clap::Parser;
use fewshot_cli::commands::{RewriteMode, run_ablation, run_replay, run_rewrite};
use fewshot_cli::PolicyArg;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fewshot")]
#[command(about = "Consistency checks for few-shot exemplar sets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true, default_value = "")]
    api_key: String,

    /// Model identifier
    #[arg(long, env = "OPENAI_MODEL", global = true, default_value = "")]
    model: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Re-query each exemplar with the full set as context and diff
    Replay {
        /// Exemplar set file (TOML)
        #[arg(long)]
        examples: PathBuf,

        /// Comparison policy
        #[arg(long, value_enum, default_value_t = PolicyArg::Exact)]
        policy: PolicyArg,
    },
    /// Re-query each exemplar with that exemplar held out and diff
    Ablation {
        /// Exemplar set file (TOML)
        #[arg(long)]
        examples: PathBuf,

        /// Comparison policy
        #[arg(long, value_enum, default_value_t = PolicyArg::Exact)]
        policy: PolicyArg,
    },
    /// Print the set with answers rewritten from fresh probes
    Rewrite {
        /// Exemplar set file (TOML)
        #[arg(long)]
        examples: PathBuf,

        /// Probe strategy for the rewritten answers
        #[arg(long, value_enum, default_value = "replay")]
        mode: RewriteMode,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let api_key = cli.api_key;
    let model = cli.model;

    let outcome = match cli.command {
        Commands::Replay { examples, policy } => {
            run_replay(&examples, api_key, model, policy.into_policy()).await
        }
        Commands::Ablation { examples, policy } => {
            run_ablation(&examples, api_key, model, policy.into_policy()).await
        }
        Commands::Rewrite { examples, mode } => {
            match run_rewrite(&examples, api_key, model, mode).await {
                Ok(()) => Ok(true),
                Err(e) => Err(e),
            }
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
