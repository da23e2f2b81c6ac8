use crate::artifacts::branch::resolved_branch::{Resolution, ResolvedBranch};
use crate::error::ResolveError;

/// Outcome of resolving every branch of a run
///
/// Branches appear in completion order; sort before presenting them.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    resolved: Vec<ResolvedBranch>,
    failures: Vec<ResolveError>,
    fallbacks: usize,
    timed_out: usize,
}

impl ResolutionReport {
    pub fn with_capacity(capacity: usize) -> Self {
        ResolutionReport {
            resolved: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn record_resolved(&mut self, branch: ResolvedBranch) {
        if branch.resolution().is_fallback() {
            self.fallbacks += 1;
        }
        if branch.resolution() == Resolution::TimedOutFallback {
            self.timed_out += 1;
        }
        self.resolved.push(branch);
    }

    /// Record a branch whose fallback could not date it
    pub fn record_failure(&mut self, error: ResolveError) {
        self.fallbacks += 1;
        self.failures.push(error);
    }

    pub fn resolved(&self) -> &[ResolvedBranch] {
        &self.resolved
    }

    pub fn failures(&self) -> &[ResolveError] {
        &self.failures
    }

    /// Number of branches that needed the version-control binary
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Of those, the branches that were handed over because the loose read
    /// exceeded its budget
    pub fn timed_out(&self) -> usize {
        self.timed_out
    }

    pub fn into_resolved(self) -> Vec<ResolvedBranch> {
        self.resolved
    }
}
