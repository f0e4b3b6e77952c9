//! Blob storage targets for finished CSV payloads

pub mod dry_run;
pub mod factory;
pub mod filesystem;
pub mod gcs;
pub mod sink;

pub use dry_run::DryRunBlobSink;
pub use factory::create_blob_sink;
pub use filesystem::FilesystemBlobSink;
pub use gcs::GcsBlobSink;
pub use sink::{validate_blob_name, BlobSink};
