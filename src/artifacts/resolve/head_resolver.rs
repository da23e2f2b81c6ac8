use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::shell::ShellFallback;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::resolved_branch::{Resolution, ResolvedBranch};
use crate::artifacts::objects::commit::CommitStamp;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::ResolveError;
use derive_new::new;
use std::sync::Arc;
use std::time::Duration;

/// Resolves a single branch to the timestamp of its head commit
///
/// Cheap to clone: every task of a run gets its own handle on the shared,
/// read-only repository areas.
#[derive(Debug, Clone, new)]
pub struct HeadResolver {
    database: Arc<Database>,
    refs: Arc<Refs>,
    fallback: Arc<ShellFallback>,
    /// Budget for the loose-object read before the branch is handed to the fallback
    native_timeout: Duration,
}

impl HeadResolver {
    /// Ref → loose commit → committer timestamp, shelling out when the
    /// commit is not loose or the read takes too long
    pub async fn resolve(&self, branch_name: &BranchName) -> Result<ResolvedBranch, ResolveError> {
        let oid = self.refs.read_ref(branch_name).await?;

        match tokio::time::timeout(self.native_timeout, self.read_native(&oid)).await {
            Ok(Ok(Some(stamp))) => {
                tracing::debug!(
                    branch = %branch_name,
                    oid = oid.to_short_oid(),
                    offset = stamp.offset(),
                    "read committer timestamp natively"
                );
                Ok(ResolvedBranch::new(
                    branch_name.clone(),
                    stamp.timestamp(),
                    Resolution::Native,
                ))
            }
            Ok(Ok(None)) => {
                tracing::debug!(
                    branch = %branch_name,
                    oid = oid.to_short_oid(),
                    "object is not loose, falling back"
                );
                self.fall_back(branch_name, oid.as_ref(), Resolution::Fallback)
                    .await
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::warn!(
                    branch = %branch_name,
                    oid = oid.to_short_oid(),
                    "loose object read exceeded {:?}, falling back",
                    self.native_timeout
                );
                self.fall_back(branch_name, oid.as_ref(), Resolution::TimedOutFallback)
                    .await
            }
        }
    }

    /// Date the branch purely through the version-control binary
    pub async fn resolve_by_shell(
        &self,
        branch_name: &BranchName,
    ) -> Result<ResolvedBranch, ResolveError> {
        self.fall_back(branch_name, branch_name.as_ref(), Resolution::Fallback)
            .await
    }

    async fn read_native(&self, oid: &ObjectId) -> Result<Option<CommitStamp>, ResolveError> {
        let Some(content) = self.database.load(oid).await? else {
            return Ok(None);
        };

        Ok(Some(CommitStamp::parse(oid, &content)?))
    }

    async fn fall_back(
        &self,
        branch_name: &BranchName,
        revision: &str,
        resolution: Resolution,
    ) -> Result<ResolvedBranch, ResolveError> {
        let timestamp = self.fallback.head_commit_time(branch_name, revision).await?;

        Ok(ResolvedBranch::new(branch_name.clone(), timestamp, resolution))
    }
}
