//! Git object identifiers and commit decoding
//!
//! Only the pieces needed to date a branch head are modelled here:
//!
//! - `object_id`: the 40-character hash and its loose-object path
//! - `commit`: extraction of the committer timestamp from a decompressed commit

pub mod commit;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
