//! Fewshot CLI library

pub mod commands;
pub mod error;

use fewshot_core::MatchPolicy;

/// Comparison policy argument for the check commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum PolicyArg {
    /// Exact equality of the cleaned strings
    #[default]
    Exact,
    /// Case-insensitive equality
    CaseFold,
}

impl PolicyArg {
    /// The core policy this argument selects
    pub fn into_policy(self) -> MatchPolicy {
        match self {
            PolicyArg::Exact => MatchPolicy::Exact,
            PolicyArg::CaseFold => MatchPolicy::CaseFold,
        }
    }
}

impl std::fmt::Display for PolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyArg::Exact => write!(f, "exact"),
            PolicyArg::CaseFold => write!(f, "case-fold"),
        }
    }
}
