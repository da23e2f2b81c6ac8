//! Branch dating data structures and algorithms
//!
//! - `branch`: Branch names and resolved branch heads
//! - `objects`: Object ids and commit timestamp extraction
//! - `resolve`: Per-branch resolution and the concurrent coordinator
//! - `recency`: Recency window selection and report rendering

pub mod branch;
pub mod objects;
pub mod recency;
pub mod resolve;
