//! Blob sink that stores nothing

use super::sink::{validate_blob_name, BlobSink};
use crate::domain::Result;
use async_trait::async_trait;

/// Logs what would have been uploaded and discards the payload
#[derive(Debug, Default)]
pub struct DryRunBlobSink;

#[async_trait]
impl BlobSink for DryRunBlobSink {
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<()> {
        validate_blob_name(name)?;
        tracing::info!(blob = %name, bytes = payload.len(), "Dry run - skipping upload");
        Ok(())
    }

    fn describe(&self) -> String {
        "dry run (nothing is stored)".to_string()
    }
}
