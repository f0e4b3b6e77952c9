//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dataexport.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing dataexport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project and bucket", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - CTP_CLIENT_SECRET (commercetools API client secret)");
                println!("     - GCS_ACCESS_TOKEN (OAuth2 token with bucket write access, valid ~1 hour)");
                println!("  3. Validate configuration: dataexport validate-config");
                println!("  4. Run export: dataexport export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# dataexport configuration file
# commercetools to CSV export tool

[application]
log_level = "info"
dry_run = false

[commercetools]
project_key = "my-project"
client_id = "my-client-id"
client_secret = "${CTP_CLIENT_SECRET}"

[storage]
target = "gcs"  # gcs | filesystem

[storage.gcs]
bucket = "my-export-bucket"
# Short-lived (about one hour): refresh before every scheduled run
access_token = "${GCS_ACCESS_TOKEN}"

[export]
include_header = false

[[export.resources]]
resource_type = "order"
fields = [
    "orderNumber",
    "customerId",
    "totalPrice",
    "lineItems.id",
    "lineItems.quantity",
    "lineItems.variant.attributes.color",
]

[[export.resources]]
resource_type = "customer"
fields = ["email", "firstName", "lastName", "addresses.city", "addresses.country"]
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# dataexport configuration file
#
# This file contains all configuration options with examples and explanations.
#
# Values of the form ${VAR_NAME} are read from the environment (or a .env
# file). Any option can also be overridden with DATAEXPORT_<SECTION>_<KEY>,
# for example DATAEXPORT_COMMERCETOOLS_PROJECT_KEY.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (fetch and flatten, but don't upload)
dry_run = false

# ============================================================================
# commercetools API
# ============================================================================
[commercetools]
# Project key
project_key = "my-project"

# API client credentials (client credentials grant)
client_id = "my-client-id"
client_secret = "${CTP_CLIENT_SECRET}"

# Region specific endpoints
auth_url = "https://auth.europe-west1.gcp.commercetools.com"
api_url = "https://api.europe-west1.gcp.commercetools.com"

# OAuth scope (default: manage_project:<project_key>)
# scope = "view_orders:my-project view_customers:my-project"

# Request timeout in seconds
timeout_seconds = 60

# Retry policy for transient failures (timeouts, 429, 5xx)
[commercetools.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Storage
# Choose ONE target
# ============================================================================
[storage]
target = "gcs"  # gcs | filesystem

# ----------------------------------------------------------------------------
# Option 1: Google Cloud Storage
# ----------------------------------------------------------------------------
[storage.gcs]
bucket = "my-export-bucket"

# OAuth2 access token with write access to the bucket.
# These tokens expire after about one hour and are not renewed by dataexport,
# so mint a fresh one before each run, for example:
#   export GCS_ACCESS_TOKEN="$(gcloud auth print-access-token)"
# DATAEXPORT_GCS_ACCESS_TOKEN overrides the value below.
access_token = "${GCS_ACCESS_TOKEN}"

# Storage API base URL
base_url = "https://storage.googleapis.com"

# Upload timeout in seconds
timeout_seconds = 300

# ----------------------------------------------------------------------------
# Option 2: Local directory
# ----------------------------------------------------------------------------
# [storage.filesystem]
# path = "./exports"

# ============================================================================
# Export
# ============================================================================
[export]
# Write the field paths as the first CSV line
include_header = false

# One entry per resource type, exported in this order.
#
# Fields are dotted paths into the resource JSON. Fields below the nested
# collection (lineItems. for orders, addresses. for customers) produce one
# child row per element; all other fields go into the parent row.
# Money values are written in major units (12.5 instead of 1250 cents).
# Order line item attributes are addressed by name:
#   lineItems.variant.attributes.<attribute name>[.<path into its value>]
[[export.resources]]
resource_type = "order"
fields = [
    "orderNumber",
    "customerId",
    "createdAt",
    "totalPrice",
    "lineItems.id",
    "lineItems.quantity",
    "lineItems.price.value",
    "lineItems.variant.sku",
    "lineItems.variant.attributes.color",
]

[[export.resources]]
resource_type = "customer"
fields = [
    "email",
    "firstName",
    "lastName",
    "addresses.streetName",
    "addresses.city",
    "addresses.country",
]

# ============================================================================
# Logging
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    fn set_credentials() {
        std::env::set_var("CTP_CLIENT_SECRET", "secret");
        std::env::set_var("GCS_ACCESS_TOKEN", "token");
    }

    #[test]
    fn test_generate_minimal_config_is_valid() {
        set_credentials();
        let config = parse_config(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.export.resources.len(), 2);
    }

    #[test]
    fn test_generate_config_with_examples_is_valid() {
        set_credentials();
        let config = parse_config(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(config.commercetools.retry.max_retries, 3);
        assert_eq!(config.export.resources[0].fields.len(), 9);
    }

    #[test]
    fn test_generated_configs_warn_about_token_lifetime() {
        assert!(InitArgs::generate_minimal_config().contains("Short-lived"));

        let annotated = InitArgs::generate_config_with_examples();
        assert!(annotated.contains("expire after about one hour"));
        assert!(annotated.contains("gcloud auth print-access-token"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dataexport.toml");
        std::fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[commercetools]"));
    }
}
