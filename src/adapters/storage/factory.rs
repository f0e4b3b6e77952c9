//! Blob sink factory

use super::dry_run::DryRunBlobSink;
use super::filesystem::FilesystemBlobSink;
use super::gcs::GcsBlobSink;
use super::sink::BlobSink;
use crate::config::{StorageConfig, StorageTarget};
use crate::domain::{DataExportError, Result};
use std::sync::Arc;

/// Create the blob sink for the configured storage target
///
/// In dry run mode a [`DryRunBlobSink`] is returned regardless of target.
///
/// # Errors
///
/// Returns an error if the section for the selected target is missing or the
/// sink cannot be created.
pub fn create_blob_sink(config: &StorageConfig, dry_run: bool) -> Result<Arc<dyn BlobSink>> {
    if dry_run {
        tracing::info!("Dry run mode - payloads will not be uploaded");
        return Ok(Arc::new(DryRunBlobSink));
    }

    match config.target {
        StorageTarget::Gcs => {
            let gcs = config.gcs.as_ref().ok_or_else(|| {
                DataExportError::Configuration(
                    "storage.gcs configuration is required when target = 'gcs'".to_string(),
                )
            })?;
            tracing::info!(bucket = %gcs.bucket, "Creating GCS blob sink");
            Ok(Arc::new(GcsBlobSink::new(gcs)?))
        }
        StorageTarget::Filesystem => {
            let filesystem = config.filesystem.as_ref().ok_or_else(|| {
                DataExportError::Configuration(
                    "storage.filesystem configuration is required when target = 'filesystem'"
                        .to_string(),
                )
            })?;
            tracing::info!(path = %filesystem.path, "Creating filesystem blob sink");
            Ok(Arc::new(FilesystemBlobSink::new(&filesystem.path)))
        }
    }
}
