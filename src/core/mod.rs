//! Core business logic for dataexport.
//!
//! # Modules
//!
//! - [`registry`] - per resource type endpoint and row layout
//! - [`transform`] - field resolution and row flattening
//! - [`export`] - paging, CSV encoding, upload and reporting
//!
//! # Export Workflow
//!
//! For each configured resource type, in order:
//!
//! 1. **Fetch**: page through the resource collection, 50 records per page
//! 2. **Flatten**: turn each record into one flat row, or a parent row plus
//!    one child row per nested collection element
//! 3. **Encode**: append the rows to an in-memory CSV payload
//! 4. **Upload**: store the payload as `{type}s/{type}s_{timestamp}.csv`
//! 5. **Report**: record SUCCESS or FAILED and move on to the next type
//!
//! # Example
//!
//! ```rust,no_run
//! use dataexport::config::load_config;
//! use dataexport::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("dataexport.toml")?;
//! let specs = config.export.export_specs()?;
//!
//! let coordinator = ExportCoordinator::from_config(&config)?;
//! let summary = coordinator.execute_export(&specs).await;
//!
//! for (resource_type, outcome) in summary.outcomes() {
//!     println!("{resource_type}: {outcome}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod registry;
pub mod transform;
