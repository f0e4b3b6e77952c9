// dataexport - commercetools to CSV export tool
// Copyright (c) 2025 Dataexport Contributors
// Licensed under the MIT License

//! # dataexport - commercetools resources as flat CSV files
//!
//! dataexport pages through commercetools resource collections (orders,
//! customers), flattens every record into CSV rows and uploads one CSV file
//! per resource type to Google Cloud Storage or a local directory.
//!
//! ## Overview
//!
//! - **Fetching** pages of 50 records, sorted `createdAt desc`
//! - **Flattening** records with a nested collection into one parent row plus
//!   one child row per element, money aware and with named attribute lookup
//! - **Uploading** one payload per resource type, only once it is complete
//! - **Isolating** failures: a failing resource type never stops the others
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (transform, export orchestration)
//! - [`adapters`] - External integrations (commercetools, GCS, filesystem)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dataexport::config::load_config;
//! use dataexport::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("dataexport.toml")?;
//!     let specs = config.export.export_specs()?;
//!
//!     let coordinator = ExportCoordinator::from_config(&config)?;
//!     let summary = coordinator.execute_export(&specs).await;
//!
//!     println!("{} of {} resource types exported", summary.succeeded(), summary.results.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Flattening
//!
//! ```rust
//! use dataexport::core::registry::descriptor;
//! use dataexport::core::transform::RowFlattener;
//! use dataexport::domain::{ExportSpec, ResourceType};
//! use serde_json::json;
//!
//! let spec = ExportSpec::parse(
//!     ResourceType::Order,
//!     ["orderNumber", "totalPrice", "lineItems.id"],
//! ).unwrap();
//! let flattener = RowFlattener::new(&spec, descriptor(ResourceType::Order).row_layout());
//!
//! let order = json!({
//!     "orderNumber": "12345",
//!     "totalPrice": {"type": "centPrecision", "centAmount": 1950, "currencyCode": "EUR"},
//!     "lineItems": [{"id": "li-1"}]
//! });
//!
//! let rows: Vec<Vec<String>> = flattener.flatten(&order).map(|row| row.into_cells()).collect();
//! assert_eq!(rows, vec![
//!     vec!["12345".to_string(), "19.5".to_string(), String::new()],
//!     vec![String::new(), String::new(), "li-1".to_string()],
//! ]);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], carrying a
//! [`domain::DataExportError`]. Source and storage failures keep their own
//! error types ([`domain::SourceError`], [`domain::StorageError`]) and convert
//! with `?`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
