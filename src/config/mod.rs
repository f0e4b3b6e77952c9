//! Configuration management for dataexport.
//!
//! TOML-based configuration loading, parsing and validation.
//!
//! # Overview
//!
//! The configuration file supports:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DATAEXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every section before anything is fetched
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`CommercetoolsConfig`] - API credentials, endpoints and retry policy
//! - [`StorageConfig`] - Upload target (GCS bucket or local directory)
//! - [`ExportConfig`] - Resource types and their field paths
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [commercetools]
//! project_key = "shop-prod"
//! client_id = "exporter"
//! client_secret = "${CTP_CLIENT_SECRET}"
//!
//! [storage]
//! target = "gcs"
//!
//! [storage.gcs]
//! bucket = "shop-exports"
//! access_token = "${GCS_ACCESS_TOKEN}"
//!
//! [[export.resources]]
//! resource_type = "order"
//! fields = ["orderNumber", "totalPrice", "lineItems.id", "lineItems.variant.attributes.color"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, CommercetoolsConfig, DataExportConfig, ExportConfig, FilesystemConfig,
    GcsConfig, LoggingConfig, ResourceExportConfig, RetryConfig, StorageConfig, StorageTarget,
};
pub use secret::{secret_string, SecretString, SecretValue};
