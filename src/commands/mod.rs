//! Command implementations
//!
//! - `porcelain`: User-facing commands
//!
//! Commands are implemented as methods on `Repository` and write their
//! output through the repository writer.

pub mod porcelain;
