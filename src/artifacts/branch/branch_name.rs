use crate::artifacts::branch::REMOTE_SEPARATOR;
use derive_new::new;
use std::path::PathBuf;

const HEADS_DIR: &str = "heads";
const REMOTES_DIR: &str = "remotes";

/// A local (`feature-x`) or remote-tracking (`origin/feature-x`) branch
///
/// The name is opaque: anything containing a `/` is taken to be a remote
/// branch, everything else a local one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct BranchName(String);

impl BranchName {
    pub fn remote(remote: &str, name: &str) -> Self {
        Self(format!("{remote}{REMOTE_SEPARATOR}{name}"))
    }

    pub fn is_remote(&self) -> bool {
        self.0.contains(REMOTE_SEPARATOR)
    }

    /// Path of the ref file relative to the `refs` directory
    ///
    /// `main` maps to `heads/main`, `origin/release` to `remotes/origin/release`.
    pub fn ref_path(&self) -> PathBuf {
        let area = if self.is_remote() {
            REMOTES_DIR
        } else {
            HEADS_DIR
        };

        PathBuf::from(area).join(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
