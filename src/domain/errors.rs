//! Domain error types
//!
//! This module defines the error hierarchy for dataexport.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main dataexport error type
///
/// This is the primary error type used throughout the application.
/// It wraps the adapter-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum DataExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource source (commercetools) errors
    #[error("Resource source error: {0}")]
    Source(#[from] SourceError),

    /// Blob storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Resource source errors
///
/// Errors that occur when fetching pages from the commercetools API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to connect to the API
    #[error("Failed to connect to commercetools API: {0}")]
    ConnectionFailed(String),

    /// OAuth token request failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// API rejected the bearer token (401)
    #[error("Access token rejected: {0}")]
    TokenRejected(String),

    /// Paged query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl SourceError {
    /// Whether retrying the request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::ConnectionFailed(_) | SourceError::Timeout(_) => true,
            SourceError::ServerError { .. } => true,
            SourceError::ClientError { status, .. } => *status == 429,
            _ => false,
        }
    }
}

/// Blob storage errors
///
/// Errors that occur when uploading export payloads.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to reach the storage service
    #[error("Failed to connect to storage: {0}")]
    ConnectionFailed(String),

    /// Storage rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Upload rejected by the storage service
    #[error("Upload of '{name}' failed: {message}")]
    UploadFailed { name: String, message: String },

    /// Local write failed
    #[error("Failed to write blob: {0}")]
    WriteFailed(String),

    /// Blob name cannot be stored by this sink
    #[error("Invalid blob name: {0}")]
    InvalidName(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for DataExportError {
    fn from(err: std::io::Error) -> Self {
        DataExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DataExportError {
    fn from(err: serde_json::Error) -> Self {
        DataExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DataExportError {
    fn from(err: toml::de::Error) -> Self {
        DataExportError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for DataExportError {
    fn from(err: csv::Error) -> Self {
        DataExportError::Csv(err.to_string())
    }
}
