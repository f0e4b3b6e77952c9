//! Google Cloud Storage blob sink
//!
//! Uses the JSON API simple media upload:
//! `POST {base_url}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={name}`.

use super::sink::{validate_blob_name, BlobSink};
use crate::config::{GcsConfig, SecretString};
use crate::domain::{DataExportError, Result, StorageError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

const CSV_CONTENT_TYPE: &str = "text/csv";

/// Uploads blobs to a GCS bucket with a bearer token
pub struct GcsBlobSink {
    client: Client,
    upload_url: String,
    bucket: String,
    access_token: SecretString,
}

impl GcsBlobSink {
    /// Create a sink for the configured bucket
    pub fn new(config: &GcsConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DataExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let upload_url = format!(
            "{}/upload/storage/v1/b/{}/o",
            config.base_url.trim_end_matches('/'),
            config.bucket
        );

        Ok(Self {
            client,
            upload_url,
            bucket: config.bucket.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Bucket this sink uploads to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobSink for GcsBlobSink {
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<()> {
        use secrecy::ExposeSecret;

        validate_blob_name(name)?;
        let size = payload.len();

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("uploadType", "media"), ("name", name)])
            .bearer_auth(self.access_token.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, CSV_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let error = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    StorageError::AuthenticationFailed(format!("status {status}: {message}"))
                }
                _ => StorageError::UploadFailed {
                    name: name.to_string(),
                    message: format!("status {status}: {message}"),
                },
            };
            return Err(error.into());
        }

        tracing::info!(bucket = %self.bucket, blob = %name, bytes = size, "Uploaded blob to GCS");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("gs://{}", self.bucket)
    }
}
