//! Validate config command implementation

use crate::cli::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config, DataExportConfig, StorageTarget};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_config_summary(&config);
        Ok(EXIT_SUCCESS)
    }
}

fn print_config_summary(config: &DataExportConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  commercetools Project: {}", config.commercetools.project_key);
    println!("  commercetools API: {}", config.commercetools.api_url);

    match config.storage.target {
        StorageTarget::Gcs => {
            if let Some(ref gcs) = config.storage.gcs {
                println!("  Storage Target: GCS");
                println!("  Bucket: {}", gcs.bucket);
            }
        }
        StorageTarget::Filesystem => {
            if let Some(ref filesystem) = config.storage.filesystem {
                println!("  Storage Target: filesystem");
                println!("  Directory: {}", filesystem.path);
            }
        }
    }

    println!("  Header Row: {}", config.export.include_header);
    for resource in &config.export.resources {
        println!(
            "  {}: {} field(s) {:?}",
            resource.resource_type,
            resource.fields.len(),
            resource.fields
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}.execute("missing.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
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
fields = ["email", "addresses.city"]
"#,
        )
        .unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }
}
