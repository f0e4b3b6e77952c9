//! Integration tests for dry-run mode and the local directory target
//!
//! A dry run pages and flattens exactly like a real export but stores
//! nothing, whatever storage target is configured.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use dataexport::adapters::commercetools::{ResourcePage, ResourceSource};
use dataexport::adapters::storage::create_blob_sink;
use dataexport::config::{FilesystemConfig, StorageConfig, StorageTarget};
use dataexport::core::export::ExportCoordinator;
use dataexport::domain::{ExportOutcome, ExportSpec, ResourceType, Result};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

/// One page of two customers for every request
struct TwoCustomers;

#[async_trait]
impl ResourceSource for TwoCustomers {
    async fn fetch_page(&self, _: ResourceType, _: u64, _: u64) -> Result<ResourcePage> {
        Ok(ResourcePage::new(
            vec![
                json!({"email": "a@example.com", "addresses": [{"city": "Bern"}, {"city": "Basel"}]}),
                json!({"email": "b@example.com", "addresses": []}),
            ],
            1,
        ))
    }
}

fn filesystem_storage(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        target: StorageTarget::Filesystem,
        gcs: None,
        filesystem: Some(FilesystemConfig {
            path: dir.path().to_string_lossy().to_string(),
        }),
    }
}

fn customer_spec() -> ExportSpec {
    ExportSpec::parse(ResourceType::Customer, ["email", "addresses.city"]).unwrap()
}

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

#[tokio::test]
async fn test_filesystem_target_writes_csv() {
    let dir = TempDir::new().unwrap();
    let sink = create_blob_sink(&filesystem_storage(&dir), false).unwrap();

    let summary = ExportCoordinator::new(Arc::new(TwoCustomers), sink)
        .with_clock(fixed_time)
        .execute_export(&[customer_spec()])
        .await;

    assert_eq!(
        summary.outcome(ResourceType::Customer),
        Some(ExportOutcome::Success)
    );

    let written = dir
        .path()
        .join("customers")
        .join("customers_2026_03_14_09_26_53.csv");
    assert_eq!(
        std::fs::read_to_string(written).unwrap(),
        "a@example.com,\r\n,Bern\r\n,Basel\r\nb@example.com,\r\n"
    );
}

#[tokio::test]
async fn test_dry_run_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let sink = create_blob_sink(&filesystem_storage(&dir), true).unwrap();

    let coordinator = ExportCoordinator::new(Arc::new(TwoCustomers), sink).with_clock(fixed_time);
    assert!(coordinator.sink_description().contains("dry run"));

    let summary = coordinator.execute_export(&[customer_spec()]).await;

    let result = &summary.results[&ResourceType::Customer];
    assert_eq!(result.outcome, ExportOutcome::Success);
    assert_eq!(result.records, 2);
    assert_eq!(result.rows, 4);
    assert_eq!(
        result.blob_name.as_deref(),
        Some("customers/customers_2026_03_14_09_26_53.csv")
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_dry_run_needs_no_storage_section() {
    let storage = StorageConfig {
        target: StorageTarget::Gcs,
        gcs: None,
        filesystem: None,
    };

    assert!(create_blob_sink(&storage, false).is_err());
    assert!(create_blob_sink(&storage, true).is_ok());
}
