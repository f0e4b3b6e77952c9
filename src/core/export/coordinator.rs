//! Export coordinator - main orchestrator for the export process
//!
//! For each requested resource type the coordinator pages through the source,
//! flattens every record into CSV rows and uploads the finished payload once.
//! A failing resource type is logged and marked FAILED; the remaining types
//! are still exported.

use crate::adapters::commercetools::{CommercetoolsClient, ResourceSource};
use crate::adapters::storage::{create_blob_sink, BlobSink};
use crate::config::DataExportConfig;
use crate::core::export::csv_buffer::CsvBuffer;
use crate::core::export::summary::{ExportSummary, ResourceExportSummary};
use crate::core::registry::{descriptor, PAGE_SIZE};
use crate::core::transform::RowFlattener;
use crate::domain::{ExportSpec, ResourceType, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Source of the timestamp embedded in blob names
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Blob name of an export: `{type}s/{type}s_{yyyy_MM_dd_HH_mm_ss}.csv`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dataexport::core::export::blob_name;
/// use dataexport::domain::ResourceType;
///
/// let at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
/// assert_eq!(blob_name(ResourceType::Order, at), "orders/orders_2026_01_01_10_00_00.csv");
/// ```
pub fn blob_name(resource_type: ResourceType, at: DateTime<Utc>) -> String {
    let name = resource_type.name();
    format!("{name}s/{name}s_{}.csv", at.format("%Y_%m_%d_%H_%M_%S"))
}

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn ResourceSource>,
    sink: Arc<dyn BlobSink>,
    clock: Clock,
    include_header: bool,
}

impl ExportCoordinator {
    /// Create a coordinator over a source and a sink
    ///
    /// Blob names use the current UTC time and no header row is written.
    pub fn new(source: Arc<dyn ResourceSource>, sink: Arc<dyn BlobSink>) -> Self {
        Self {
            source,
            sink,
            clock: Arc::new(Utc::now),
            include_header: false,
        }
    }

    /// Create a coordinator wired to the configured commercetools project and storage target
    pub fn from_config(config: &DataExportConfig) -> Result<Self> {
        let source = Arc::new(CommercetoolsClient::new(config.commercetools.clone())?);
        let sink = create_blob_sink(&config.storage, config.application.dry_run)?;

        Ok(Self::new(source, sink).with_header(config.export.include_header))
    }

    /// Replace the clock used for blob names
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Write the field paths as the first CSV line
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Where payloads are uploaded, for logs
    pub fn sink_description(&self) -> String {
        self.sink.describe()
    }

    /// Execute the export for every spec, in order
    ///
    /// Never fails as a whole: each resource type ends up SUCCESS or FAILED
    /// in the returned summary.
    pub async fn execute_export(&self, specs: &[ExportSpec]) -> ExportSummary {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            resource_types = specs.len(),
            target = %self.sink.describe(),
            "Starting export process"
        );

        for spec in specs {
            summary.record(self.export_one(spec).await);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }

    /// Export a single resource type
    ///
    /// Uploads at most once, and only after every page was fetched and
    /// written.
    pub async fn export_one(&self, spec: &ExportSpec) -> ResourceExportSummary {
        let start_time = Instant::now();
        let resource_type = spec.resource_type;
        crate::log_export_start!(resource_type, spec.width());

        let mut result = ResourceExportSummary::new(resource_type);
        let outcome = self.run_export(spec, &mut result).await;

        let result = match outcome {
            Ok((name, bytes)) => result.succeeded(name, bytes),
            Err(e) => {
                tracing::error!(
                    resource_type = %resource_type,
                    error = %e,
                    "Error while executing data export for resource type. Continue with next resource type."
                );
                result.failed(e.to_string())
            }
        };

        result.with_duration(start_time.elapsed())
    }

    /// Fetch, flatten and upload; returns the blob name and payload size
    async fn run_export(
        &self,
        spec: &ExportSpec,
        result: &mut ResourceExportSummary,
    ) -> Result<(String, usize)> {
        let resource_type = spec.resource_type;
        let flattener = RowFlattener::new(spec, descriptor(resource_type).row_layout());
        let mut buffer = CsvBuffer::new();

        if self.include_header {
            buffer.write_header(flattener.columns())?;
        }

        let first = self.source.fetch_page(resource_type, 0, PAGE_SIZE).await?;
        let total_pages = first.total_pages;
        result.pages_fetched = 1;
        result.records += write_records(&flattener, &first.records, &mut buffer)?;

        for page_index in 1..total_pages {
            let offset = page_index * PAGE_SIZE;
            let page = self.source.fetch_page(resource_type, offset, PAGE_SIZE).await?;
            result.pages_fetched += 1;
            result.records += write_records(&flattener, &page.records, &mut buffer)?;

            tracing::debug!(
                resource_type = %resource_type,
                page = page_index + 1,
                total_pages = total_pages,
                "Processed page"
            );
        }

        result.rows = buffer.rows();
        let payload = buffer.into_bytes()?;
        let bytes = payload.len();
        let name = blob_name(resource_type, (self.clock)());

        tracing::info!(
            resource_type = %resource_type,
            blob = %name,
            records = result.records,
            rows = result.rows,
            bytes = bytes,
            "Uploading export"
        );
        self.sink.upload(&name, payload).await?;

        Ok((name, bytes))
    }
}

fn write_records(
    flattener: &RowFlattener,
    records: &[crate::domain::Document],
    buffer: &mut CsvBuffer,
) -> Result<usize> {
    for record in records {
        for row in flattener.flatten(record) {
            buffer.write_row(&row)?;
        }
    }
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blob_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(
            blob_name(ResourceType::Order, at),
            "orders/orders_2026_01_01_10_00_00.csv"
        );

        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 7).unwrap();
        assert_eq!(
            blob_name(ResourceType::Customer, at),
            "customers/customers_2025_12_31_23_59_07.csv"
        );
    }
}
