use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures raised while resolving a branch head to its commit timestamp.
///
/// A missing loose object is not listed here: the object store reports it as
/// `Ok(None)` and the resolver switches to the shell fallback.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unable to read ref for branch {branch} at {}: {source}", .path.display())]
    RefRead {
        branch: BranchName,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to read object {oid} at {}: {source}", .path.display())]
    ObjectRead {
        oid: ObjectId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decompress object {oid}: {source}")]
    ObjectDecode {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed commit {oid}: {reason}")]
    MalformedCommit { oid: ObjectId, reason: String },
    #[error("fallback for branch {branch} failed: {reason}")]
    FallbackExecution { branch: BranchName, reason: String },
    #[error("fallback for branch {branch} timed out after {timeout:?}")]
    FallbackTimeout {
        branch: BranchName,
        timeout: Duration,
    },
    #[error("resolution task for branch {branch} did not complete: {reason}")]
    TaskAborted { branch: BranchName, reason: String },
    #[error("resolution of branch {branch} failed")]
    Fatal {
        branch: BranchName,
        #[source]
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Fatal errors point at a corrupt or misidentified repository and abort
    /// the whole run; the rest only fail the branch they belong to.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ResolveError::FallbackExecution { .. } | ResolveError::FallbackTimeout { .. }
        )
    }

    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            ResolveError::RefRead { branch, .. }
            | ResolveError::FallbackExecution { branch, .. }
            | ResolveError::FallbackTimeout { branch, .. }
            | ResolveError::TaskAborted { branch, .. }
            | ResolveError::Fatal { branch, .. } => Some(branch),
            _ => None,
        }
    }
}
