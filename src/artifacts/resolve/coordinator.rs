use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::resolve::Strategy;
use crate::artifacts::resolve::head_resolver::HeadResolver;
use crate::artifacts::resolve::report::ResolutionReport;
use crate::error::ResolveError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

/// Resolve every branch concurrently, one task per branch
///
/// At most `max_concurrency` tasks do work at once, clamped to what a
/// semaphore can hand out. Results and the fallback tally go through a single
/// lock. Returns once all tasks have finished.
///
/// A fatal error in any task aborts the remaining tasks and is returned
/// wrapped with the branch it came from. Fallback failures are collected in
/// the report instead.
pub async fn resolve_all(
    resolver: HeadResolver,
    branches: &[BranchName],
    strategy: Strategy,
    max_concurrency: usize,
) -> Result<ResolutionReport, ResolveError> {
    let sink = Arc::new(Mutex::new(ResolutionReport::with_capacity(branches.len())));
    let permits = Arc::new(Semaphore::new(max_concurrency.clamp(1, Semaphore::MAX_PERMITS)));
    let mut tasks = JoinSet::new();
    let mut task_branches = HashMap::with_capacity(branches.len());

    for branch_name in branches {
        let resolver = resolver.clone();
        let sink = sink.clone();
        let permits = permits.clone();
        let task_branch = branch_name.clone();

        let handle = tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.map_err(|e| {
                let aborted = ResolveError::TaskAborted {
                    branch: task_branch.clone(),
                    reason: e.to_string(),
                };
                fatal(&task_branch, aborted)
            })?;

            let resolved = match strategy {
                Strategy::Hybrid => resolver.resolve(&task_branch).await,
                Strategy::Shell => resolver.resolve_by_shell(&task_branch).await,
            };

            match resolved {
                Ok(branch) => {
                    tracing::debug!(
                        branch = %branch.name(),
                        timestamp = branch.head_commit_timestamp(),
                        resolution = ?branch.resolution(),
                        "resolved branch head"
                    );
                    sink.lock().await.record_resolved(branch);
                    Ok::<(), ResolveError>(())
                }
                Err(e) if e.is_fatal() => Err(fatal(&task_branch, e)),
                Err(e) => {
                    tracing::warn!(branch = %task_branch, "{e}");
                    sink.lock().await.record_failure(e);
                    Ok(())
                }
            }
        });
        task_branches.insert(handle.id(), branch_name.clone());
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, Ok(()))) => {}
            Ok((_, Err(e))) => {
                tracing::error!("{e}, aborting remaining resolutions");
                tasks.abort_all();
                return Err(e);
            }
            Err(join_error) => {
                tasks.abort_all();
                let branch = task_branches
                    .remove(&join_error.id())
                    .unwrap_or_default();
                return Err(fatal(
                    &branch,
                    ResolveError::TaskAborted {
                        branch: branch.clone(),
                        reason: join_error.to_string(),
                    },
                ));
            }
        }
    }

    let report = std::mem::take(&mut *sink.lock().await);
    tracing::info!(
        resolved = report.resolved().len(),
        failed = report.failures().len(),
        fallbacks = report.fallbacks(),
        timed_out = report.timed_out(),
        %strategy,
        "resolved {} branches",
        branches.len()
    );

    Ok(report)
}

fn fatal(branch_name: &BranchName, source: ResolveError) -> ResolveError {
    ResolveError::Fatal {
        branch: branch_name.clone(),
        source: Box::new(source),
    }
}
