pub mod branch_name;
pub mod resolved_branch;

/// Remote whose tracking branches are listed alongside the local ones
pub const ORIGIN_REMOTE: &str = "origin";
/// Separator between a remote name and its branch (`origin/feature-x`)
pub const REMOTE_SEPARATOR: char = '/';
