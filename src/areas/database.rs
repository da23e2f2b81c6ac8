use crate::artifacts::objects::object_id::ObjectId;
use crate::error::ResolveError;
use bytes::Bytes;
use derive_new::new;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Read-only view of `.git/objects`
///
/// Only loose objects are understood. An object that is missing from loose
/// storage is reported as `Ok(None)`: it most likely lives in a packfile.
#[derive(Debug, new)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles natively so packed heads stop needing the shell fallback
impl Database {
    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Load and fully decompress a loose object
    pub async fn load(&self, object_id: &ObjectId) -> Result<Option<Bytes>, ResolveError> {
        // anything that is not a full hash cannot name a loose object file
        if !object_id.is_well_formed() {
            tracing::debug!(oid = %object_id, "not a full object id, skipping loose lookup");
            return Ok(None);
        }

        let object_path = self.object_path(object_id);
        let object_content = match tokio::fs::read(&object_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ResolveError::ObjectRead {
                    oid: object_id.clone(),
                    path: object_path,
                    source,
                });
            }
        };

        // inflating is CPU-bound, keep it off the async workers
        let decompressed = tokio::task::spawn_blocking(move || {
            Self::decompress(object_content.into())
        })
        .await
        .unwrap_or_else(|join_error| Err(std::io::Error::other(join_error)));

        decompressed
            .map(Some)
            .map_err(|source| ResolveError::ObjectDecode {
                oid: object_id.clone(),
                source,
            })
    }

    fn decompress(data: Bytes) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }
}
