use crate::artifacts::branch::branch_name::BranchName;
use derive_new::new;

/// How the head commit timestamp of a branch was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Read from the loose commit object
    Native,
    /// Obtained by shelling out to the version-control binary because the
    /// commit was not loose
    Fallback,
    /// Obtained by shelling out after the loose read ran out of time
    TimedOutFallback,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Resolution::Native)
    }
}

/// A branch together with the Unix timestamp of its head commit
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ResolvedBranch {
    name: BranchName,
    head_commit_timestamp: i64,
    resolution: Resolution,
}

impl ResolvedBranch {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn head_commit_timestamp(&self) -> i64 {
        self.head_commit_timestamp
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}
