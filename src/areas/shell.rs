use crate::artifacts::branch::branch_name::BranchName;
use crate::error::ResolveError;
use derive_new::new;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Dates a revision by asking the `git` binary
///
/// Used when the head commit is not stored as a loose object. Each call owns
/// its own subprocess, which is killed if the timeout elapses first.
#[derive(Debug, new)]
pub struct ShellFallback {
    /// Version-control binary to invoke (usually `git`)
    binary: String,
    /// Work tree the command runs in
    work_tree: Box<Path>,
    timeout: Duration,
}

impl ShellFallback {
    /// Unix timestamp of the newest commit reachable from `revision`
    ///
    /// Runs `<binary> log -n 1 --format=%at <revision> --` and parses the
    /// trimmed combined output as an integer.
    pub async fn head_commit_time(
        &self,
        branch_name: &BranchName,
        revision: &str,
    ) -> Result<i64, ResolveError> {
        let mut command = Command::new(&self.binary);
        command
            .current_dir(&self.work_tree)
            .args(["log", "-n", "1", "--format=%at", revision, "--"])
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(branch = %branch_name, revision, "shelling out to {}", self.binary);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(output) => output.map_err(|e| {
                self.execution_error(branch_name, format!("unable to run {}: {e}", self.binary))
            })?,
            Err(_) => {
                return Err(ResolveError::FallbackTimeout {
                    branch: branch_name.clone(),
                    timeout: self.timeout,
                });
            }
        };

        let combined = [output.stdout, output.stderr].concat();
        let combined = String::from_utf8_lossy(&combined);
        let combined = combined.trim();

        if !output.status.success() {
            return Err(self.execution_error(
                branch_name,
                format!("{} exited with {}: {combined}", self.binary, output.status),
            ));
        }

        combined.parse::<i64>().map_err(|e| {
            self.execution_error(branch_name, format!("unexpected output {combined:?}: {e}"))
        })
    }

    fn execution_error(&self, branch_name: &BranchName, reason: String) -> ResolveError {
        ResolveError::FallbackExecution {
            branch: branch_name.clone(),
            reason,
        }
    }
}
