//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{ExportOutcome, ResourceType};
use std::collections::BTreeMap;
use std::time::Duration;

/// Result of exporting one resource type
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceExportSummary {
    /// Resource type
    pub resource_type: ResourceType,

    /// SUCCESS or FAILED
    pub outcome: ExportOutcome,

    /// Name of the uploaded blob (set on success only)
    pub blob_name: Option<String>,

    /// Number of pages fetched
    pub pages_fetched: u64,

    /// Number of records flattened
    pub records: usize,

    /// Number of CSV rows written, header excluded
    pub rows: usize,

    /// Size of the uploaded payload in bytes
    pub bytes: usize,

    /// Duration of this resource type's export
    pub duration: Duration,

    /// Error message (set on failure only)
    pub error: Option<String>,
}

impl ResourceExportSummary {
    /// Create an empty summary for a resource type
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            outcome: ExportOutcome::Failed,
            blob_name: None,
            pages_fetched: 0,
            records: 0,
            rows: 0,
            bytes: 0,
            duration: Duration::from_secs(0),
            error: None,
        }
    }

    /// Mark the export as uploaded under `blob_name`
    pub fn succeeded(mut self, blob_name: String, bytes: usize) -> Self {
        self.outcome = ExportOutcome::Success;
        self.blob_name = Some(blob_name);
        self.bytes = bytes;
        self.error = None;
        self
    }

    /// Mark the export as failed
    pub fn failed(mut self, error: String) -> Self {
        self.outcome = ExportOutcome::Failed;
        self.blob_name = None;
        self.bytes = 0;
        self.error = Some(error);
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ExportOutcome::Success
    }
}

/// Summary of an export run across resource types
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Per resource type results
    pub results: BTreeMap<ResourceType, ResourceExportSummary>,

    /// Duration of the whole run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the result of one resource type
    pub fn record(&mut self, result: ResourceExportSummary) {
        self.results.insert(result.resource_type, result);
    }

    /// Outcome of a resource type, if it was part of the run
    pub fn outcome(&self, resource_type: ResourceType) -> Option<ExportOutcome> {
        self.results.get(&resource_type).map(|r| r.outcome)
    }

    /// Outcome map of the run
    pub fn outcomes(&self) -> BTreeMap<ResourceType, ExportOutcome> {
        self.results
            .iter()
            .map(|(resource_type, result)| (*resource_type, result.outcome))
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Check if every resource type was exported
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Total number of CSV rows written across resource types
    pub fn total_rows(&self) -> usize {
        self.results.values().map(|r| r.rows).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            resource_types = self.results.len(),
            succeeded = self.succeeded(),
            failed = self.failed(),
            total_rows = self.total_rows(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        for result in self.results.values() {
            match result.outcome {
                ExportOutcome::Success => tracing::info!(
                    resource_type = %result.resource_type,
                    outcome = %result.outcome,
                    blob = result.blob_name.as_deref().unwrap_or_default(),
                    records = result.records,
                    rows = result.rows,
                    bytes = result.bytes,
                    "Resource type exported"
                ),
                ExportOutcome::Failed => tracing::warn!(
                    resource_type = %result.resource_type,
                    outcome = %result.outcome,
                    error = result.error.as_deref().unwrap_or_default(),
                    "Resource type failed"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_summary_defaults_to_failed() {
        let summary = ResourceExportSummary::new(ResourceType::Order);

        assert_eq!(summary.outcome, ExportOutcome::Failed);
        assert!(summary.blob_name.is_none());
        assert!(summary.error.is_none());
        assert_eq!(summary.rows, 0);
    }

    #[test]
    fn test_resource_summary_transitions() {
        let summary = ResourceExportSummary::new(ResourceType::Customer)
            .succeeded("customers/customers_x.csv".to_string(), 42);
        assert!(summary.is_success());
        assert_eq!(summary.bytes, 42);

        let summary = summary.failed("upload refused".to_string());
        assert!(!summary.is_success());
        assert!(summary.blob_name.is_none());
        assert_eq!(summary.error.as_deref(), Some("upload refused"));
    }

    #[test]
    fn test_export_summary_outcomes() {
        let mut summary = ExportSummary::new();
        assert!(summary.is_successful());

        summary.record(ResourceExportSummary::new(ResourceType::Order).succeeded("o".to_string(), 1));
        summary.record(ResourceExportSummary::new(ResourceType::Customer).failed("boom".to_string()));

        assert_eq!(summary.outcome(ResourceType::Order), Some(ExportOutcome::Success));
        assert_eq!(summary.outcome(ResourceType::Customer), Some(ExportOutcome::Failed));
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_successful());

        let outcomes = summary.outcomes();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[&ResourceType::Order], ExportOutcome::Success);
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));
        assert_eq!(summary.duration, Duration::from_secs(120));
    }
}
