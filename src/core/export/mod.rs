//! Export orchestration
//!
//! - Paging through a resource source and flattening records into CSV rows
//! - Uploading one CSV payload per resource type
//! - Summary and reporting

pub mod coordinator;
pub mod csv_buffer;
pub mod summary;

pub use coordinator::{blob_name, Clock, ExportCoordinator};
pub use csv_buffer::CsvBuffer;
pub use summary::{ExportSummary, ResourceExportSummary};
