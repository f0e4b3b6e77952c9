//! Blob sink abstraction

use crate::domain::{Result, StorageError};
use async_trait::async_trait;

/// Destination for finished CSV payloads
///
/// A sink receives each payload exactly once, whole. Retrying a failed
/// upload is up to the implementation.
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Store `payload` under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the payload could not be stored.
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<()>;

    /// Short description of where blobs end up, for logs
    fn describe(&self) -> String;
}

/// Reject names that are empty, absolute or escape their root
pub fn validate_blob_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("blob name is empty".to_string()).into());
    }
    if name.starts_with('/') || name.contains('\\') {
        return Err(StorageError::InvalidName(format!("'{name}' is not a relative name")).into());
    }
    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidName(format!(
            "'{name}' contains an empty or relative segment"
        ))
        .into());
    }
    Ok(())
}
