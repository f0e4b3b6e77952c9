//! External system integrations.
//!
//! - [`commercetools`] - paged resource queries against the commercetools API
//! - [`storage`] - blob sinks (Google Cloud Storage, local directory, dry run)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind the [`ResourceSource`] and
//! [`BlobSink`] traits so the export coordinator can be driven by in-memory
//! implementations in tests.
//!
//! ```rust,no_run
//! use dataexport::adapters::commercetools::CommercetoolsClient;
//! use dataexport::adapters::storage::create_blob_sink;
//! use dataexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dataexport.toml")?;
//! let source = CommercetoolsClient::new(config.commercetools.clone())?;
//! let sink = create_blob_sink(&config.storage, config.application.dry_run)?;
//! println!("Uploading to {}", sink.describe());
//! # Ok(())
//! # }
//! ```
//!
//! [`ResourceSource`]: commercetools::ResourceSource
//! [`BlobSink`]: storage::BlobSink

pub mod commercetools;
pub mod storage;
