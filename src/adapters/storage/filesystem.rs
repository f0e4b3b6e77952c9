//! Local directory blob sink

use super::sink::{validate_blob_name, BlobSink};
use crate::domain::{Result, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes blobs below a root directory, creating parent directories as needed
pub struct FilesystemBlobSink {
    root: PathBuf,
}

impl FilesystemBlobSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a blob name maps to
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_blob_name(name)?;
        Ok(name.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

#[async_trait]
impl BlobSink for FilesystemBlobSink {
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<()> {
        let path = self.path_for(name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed(format!("{}: {e}", parent.display()))
            })?;
        }

        let size = payload.len();
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = size, "Wrote blob to filesystem");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_creates_nested_file() {
        let dir = TempDir::new().unwrap();
        let sink = FilesystemBlobSink::new(dir.path());

        sink.upload("orders/orders_2026_01_01_10_00_00.csv", b"a,b\r\n".to_vec())
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("orders").join("orders_2026_01_01_10_00_00.csv"))
            .unwrap();
        assert_eq!(written, b"a,b\r\n");
    }

    #[tokio::test]
    async fn test_upload_rejects_escaping_name() {
        let dir = TempDir::new().unwrap();
        let sink = FilesystemBlobSink::new(dir.path());

        let result = sink.upload("../outside.csv", Vec::new()).await;
        assert!(result.is_err());
    }
}
