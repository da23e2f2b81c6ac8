//! Branch refs
//!
//! Loose refs are plain files under `.git/refs` holding a 40-character hash
//! followed by a newline:
//!
//! - local branches: `refs/heads/<name>`
//! - remote-tracking branches: `refs/remotes/<remote>/<name>`
//!
//! Packed refs (`.git/packed-refs`) are not consulted.

use crate::artifacts::branch::ORIGIN_REMOTE;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::ResolveError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the symbolic ref a remote keeps for its default branch
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    /// Read the commit hash a branch points to
    ///
    /// The single trailing newline is stripped and the rest is returned as is.
    pub async fn read_ref(&self, branch_name: &BranchName) -> Result<ObjectId, ResolveError> {
        let ref_path = self.ref_path(branch_name);

        let content = tokio::fs::read_to_string(&ref_path)
            .await
            .map_err(|source| ResolveError::RefRead {
                branch: branch_name.clone(),
                path: ref_path,
                source,
            })?;
        let content = content.strip_suffix('\n').unwrap_or(&content);

        Ok(ObjectId::new(content.to_string()))
    }

    pub fn ref_path(&self, branch_name: &BranchName) -> PathBuf {
        self.refs_path().join(branch_name.ref_path())
    }

    /// List local branches followed by the `origin` remote-tracking branches
    ///
    /// Only files directly inside each directory are listed; the remote's
    /// `HEAD` is skipped.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            anyhow::bail!("not a git repository: {} is missing", heads_path.display());
        }

        let local = Self::list_ref_files(&heads_path)?
            .into_iter()
            .map(BranchName::new);

        let origin_path = self.remote_path(ORIGIN_REMOTE);
        let remote = if origin_path.is_dir() {
            Self::list_ref_files(&origin_path)?
        } else {
            Vec::new()
        }
        .into_iter()
        .filter(|name| name != HEAD_REF_NAME)
        .map(|name| BranchName::remote(ORIGIN_REMOTE, &name));

        Ok(local.chain(remote).collect())
    }

    fn list_ref_files(path: &Path) -> anyhow::Result<Vec<String>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    Some(Ok(entry.file_name().to_string_lossy().to_string()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to list refs in {}", path.display()))
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn remote_path(&self, remote: &str) -> Box<Path> {
        self.refs_path()
            .join("remotes")
            .join(remote)
            .into_boxed_path()
    }
}
