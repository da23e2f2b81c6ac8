//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings. Loose objects live in
//! `.git/objects/<first-2-chars>/<remaining-38-chars>`.
//!
//! Ref files are trusted as-is: an ObjectId read from a ref is not validated,
//! a malformed one simply never matches a loose object.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use derive_new::new;
use std::path::PathBuf;

/// Git object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct ObjectId(String);

impl ObjectId {
    /// Whether the id has the shape of a full SHA-1 hex digest
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == OBJECT_ID_LENGTH && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        match self.0.split_at_checked(2) {
            Some((dir, file)) => PathBuf::from(dir).join(file),
            None => PathBuf::from(&self.0),
        }
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
