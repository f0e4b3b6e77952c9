//! Domain models and types for dataexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Resource types** ([`ResourceType`]) and per-type outcomes ([`ExportOutcome`])
//! - **Field paths** ([`FieldPath`]) and the column layout of one CSV ([`ExportSpec`])
//! - **Error types** ([`DataExportError`], [`SourceError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! Fetched records are handled as [`Document`]s, a plain JSON tree. Any
//! platform-specific record type is converted to a document at the adapter
//! boundary, so the export core never sees the native type.
//!
//! ```rust
//! use dataexport::domain::{ExportSpec, ResourceType};
//!
//! # fn example() -> Result<(), String> {
//! let spec = ExportSpec::parse(
//!     ResourceType::Order,
//!     ["orderNumber", "customerId", "lineItems.id", "lineItems.quantity"],
//! )?;
//! assert_eq!(spec.width(), 4);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod field_path;
pub mod resource;
pub mod result;

pub use errors::{DataExportError, SourceError, StorageError};
pub use field_path::{ExportSpec, FieldPath, PATH_SEPARATOR};
pub use resource::{ExportOutcome, ResourceType};
pub use result::Result;

/// One fetched resource record as a generic JSON tree
///
/// Object keys keep their source order.
pub type Document = serde_json::Value;
