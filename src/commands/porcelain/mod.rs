//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `latest`: Date every branch head and list the recently touched ones

pub mod latest;
