//! Report which branches of a local repository were committed to recently.
//!
//! Branch heads are dated by reading loose commit objects straight from
//! `.git/objects`, falling back to `git log` for commits that only exist in
//! packfiles.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;
