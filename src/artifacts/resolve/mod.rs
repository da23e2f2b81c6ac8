//! Branch head dating
//!
//! - `head_resolver`: resolves one branch (ref, loose object, fallback)
//! - `coordinator`: fans out one task per branch and collects the results
//! - `report`: the collected results, failures and fallback tally

pub mod coordinator;
pub mod head_resolver;
pub mod report;

/// Default cap on branches resolved at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 64;

/// How branch heads are dated
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Read loose commit objects, shell out only for packed ones
    Hybrid,
    /// Shell out to the version-control binary for every branch
    Shell,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Hybrid => write!(f, "hybrid"),
            Strategy::Shell => write!(f, "shell"),
        }
    }
}
