//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX to avoid
//! interference between tests.

use dataexport::config::{load_config, StorageTarget};
use dataexport::domain::ResourceType;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DATAEXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DATAEXPORT_APPLICATION_DRY_RUN");
    std::env::remove_var("DATAEXPORT_COMMERCETOOLS_PROJECT_KEY");
    std::env::remove_var("DATAEXPORT_STORAGE_TARGET");
    std::env::remove_var("DATAEXPORT_GCS_BUCKET");
    std::env::remove_var("DATAEXPORT_EXPORT_INCLUDE_HEADER");
    std::env::remove_var("TEST_CTP_CLIENT_SECRET");
    std::env::remove_var("TEST_GCS_ACCESS_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const COMPLETE_TOML: &str = r#"
[application]
log_level = "debug"
dry_run = true

[commercetools]
project_key = "shop"
client_id = "client"
client_secret = "${TEST_CTP_CLIENT_SECRET}"
auth_url = "https://auth.us-central1.gcp.commercetools.com"
api_url = "https://api.us-central1.gcp.commercetools.com"
scope = "view_orders:shop view_customers:shop"
timeout_seconds = 30

[commercetools.retry]
max_retries = 5
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 1.5

[storage]
target = "gcs"

[storage.gcs]
bucket = "shop-exports"
access_token = "${TEST_GCS_ACCESS_TOKEN}"

[export]
include_header = true

[[export.resources]]
resource_type = "order"
fields = ["orderNumber", "totalPrice", "lineItems.id", "lineItems.variant.attributes.color"]

[[export.resources]]
resource_type = "customer"
fields = ["email", "addresses.city"]

[logging]
local_enabled = true
local_path = "/tmp/dataexport"
local_rotation = "hourly"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CTP_CLIENT_SECRET", "ctp-secret");
    std::env::set_var("TEST_GCS_ACCESS_TOKEN", "gcs-token");

    let file = write_config(COMPLETE_TOML);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    assert_eq!(config.commercetools.project_key, "shop");
    assert_eq!(
        config.commercetools.client_secret.expose_secret(),
        "ctp-secret"
    );
    assert_eq!(
        config.commercetools.effective_scope(),
        "view_orders:shop view_customers:shop"
    );
    assert_eq!(config.commercetools.retry.max_retries, 5);

    assert_eq!(config.storage.target, StorageTarget::Gcs);
    let gcs = config.storage.gcs.as_ref().unwrap();
    assert_eq!(gcs.bucket, "shop-exports");
    assert_eq!(gcs.access_token.expose_secret(), "gcs-token");
    assert_eq!(gcs.base_url, "https://storage.googleapis.com");

    let specs = config.export.export_specs().unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].resource_type, ResourceType::Order);
    assert_eq!(specs[0].width(), 4);
    assert_eq!(specs[1].resource_type, ResourceType::Customer);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    cleanup_env_vars();
}

#[test]
fn test_missing_secret_variable_is_reported() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(COMPLETE_TOML);
    let err = load_config(file.path()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("TEST_CTP_CLIENT_SECRET"));
    assert!(message.contains("TEST_GCS_ACCESS_TOKEN"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CTP_CLIENT_SECRET", "ctp-secret");
    std::env::set_var("TEST_GCS_ACCESS_TOKEN", "gcs-token");
    std::env::set_var("DATAEXPORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("DATAEXPORT_APPLICATION_DRY_RUN", "false");
    std::env::set_var("DATAEXPORT_COMMERCETOOLS_PROJECT_KEY", "staging-shop");
    std::env::set_var("DATAEXPORT_GCS_BUCKET", "staging-exports");
    std::env::set_var("DATAEXPORT_EXPORT_INCLUDE_HEADER", "false");

    let file = write_config(COMPLETE_TOML);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(!config.application.dry_run);
    assert_eq!(config.commercetools.project_key, "staging-shop");
    assert_eq!(config.storage.gcs.as_ref().unwrap().bucket, "staging-exports");
    assert!(!config.export.include_header);

    cleanup_env_vars();
}

#[test]
fn test_storage_target_override_requires_matching_section() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CTP_CLIENT_SECRET", "ctp-secret");
    std::env::set_var("TEST_GCS_ACCESS_TOKEN", "gcs-token");
    std::env::set_var("DATAEXPORT_STORAGE_TARGET", "filesystem");

    let file = write_config(COMPLETE_TOML);
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("filesystem"));

    cleanup_env_vars();
}

#[test]
fn test_unknown_storage_target_override_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CTP_CLIENT_SECRET", "ctp-secret");
    std::env::set_var("TEST_GCS_ACCESS_TOKEN", "gcs-token");
    std::env::set_var("DATAEXPORT_STORAGE_TARGET", "s3");

    let file = write_config(COMPLETE_TOML);
    let err = load_config(file.path()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("DATAEXPORT_STORAGE_TARGET"));
    assert!(message.contains("'s3'"));

    cleanup_env_vars();
}

#[test]
fn test_malformed_boolean_override_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CTP_CLIENT_SECRET", "ctp-secret");
    std::env::set_var("TEST_GCS_ACCESS_TOKEN", "gcs-token");
    std::env::set_var("DATAEXPORT_APPLICATION_DRY_RUN", "maybe");

    let file = write_config(COMPLETE_TOML);
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("DATAEXPORT_APPLICATION_DRY_RUN"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_field_path_names_resource_type() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[commercetools]
project_key = "shop"
client_id = "client"
client_secret = "secret"

[storage]
target = "filesystem"

[storage.filesystem]
path = "./exports"

[[export.resources]]
resource_type = "customer"
fields = ["email", "addresses..city"]
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Configuration validation failed"));
    assert!(message.contains("customer"));
}

#[test]
fn test_unknown_resource_type_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[commercetools]
project_key = "shop"
client_id = "client"
client_secret = "secret"

[storage]
target = "filesystem"

[storage.filesystem]
path = "./exports"

[[export.resources]]
resource_type = "product"
fields = ["id"]
"#,
    );

    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/dataexport.toml").unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}
