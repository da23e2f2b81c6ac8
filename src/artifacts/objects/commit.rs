//! Committer timestamp extraction
//!
//! A decompressed loose commit looks like:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! Only the `committer` line is read. The timezone is kept for display but
//! never applied: the timestamp is the raw Unix seconds value.

use crate::artifacts::objects::object_id::ObjectId;
use crate::error::ResolveError;

const COMMITTER_FIELD: &str = "committer";
const COMMIT_TYPE: &str = "commit";

/// Timestamp of a commit as recorded on its committer line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStamp {
    timestamp: i64,
    offset: String,
}

impl CommitStamp {
    /// Parse the committer line of a decompressed commit object
    ///
    /// Accepts the object with or without its `commit <size>\0` header.
    pub fn parse(oid: &ObjectId, content: &[u8]) -> Result<Self, ResolveError> {
        let body = Self::strip_header(oid, content)?;
        let text = String::from_utf8_lossy(body);

        let committer = text
            .lines()
            .find(|line| line.split_whitespace().next() == Some(COMMITTER_FIELD))
            .ok_or_else(|| malformed(oid, "no committer line"))?;

        let fields = committer.split_whitespace().collect::<Vec<_>>();
        // committer <ident...> <timestamp> <offset>
        if fields.len() < 3 {
            return Err(malformed(
                oid,
                format!("committer line has too few fields: {committer:?}"),
            ));
        }

        let timestamp_field = fields[fields.len() - 2];
        let timestamp = timestamp_field.parse::<i64>().map_err(|e| {
            malformed(
                oid,
                format!("invalid committer timestamp {timestamp_field:?}: {e}"),
            )
        })?;

        Ok(CommitStamp {
            timestamp,
            offset: fields[fields.len() - 1].to_string(),
        })
    }

    fn strip_header<'a>(oid: &ObjectId, content: &'a [u8]) -> Result<&'a [u8], ResolveError> {
        let Some(nul) = content.iter().position(|b| *b == 0) else {
            return Ok(content);
        };

        let header = String::from_utf8_lossy(&content[..nul]);
        match header.split_once(' ') {
            Some((COMMIT_TYPE, _)) => Ok(&content[nul + 1..]),
            Some((object_type, _)) => Err(malformed(
                oid,
                format!("expected a commit object, found {object_type}"),
            )),
            None => Err(malformed(oid, format!("invalid object header {header:?}"))),
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn offset(&self) -> &str {
        &self.offset
    }
}

fn malformed(oid: &ObjectId, reason: impl Into<String>) -> ResolveError {
    ResolveError::MalformedCommit {
        oid: oid.clone(),
        reason: reason.into(),
    }
}
