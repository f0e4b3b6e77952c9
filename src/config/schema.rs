//! Configuration schema types
//!
//! The configuration is an immutable value: it is parsed, overridden from the
//! environment and validated once by the loader, then handed to the export
//! coordinator as a whole.

use crate::config::SecretString;
use crate::domain::{ExportSpec, FieldPath, ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Blob storage target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTarget {
    /// Google Cloud Storage bucket
    Gcs,
    /// Local directory
    Filesystem,
}

/// Main dataexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// commercetools API configuration
    pub commercetools: CommercetoolsConfig,

    /// Blob storage configuration
    pub storage: StorageConfig,

    /// Export settings
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DataExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.commercetools.validate()?;
        self.storage.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and flatten, but don't upload)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for API requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("commercetools.retry.max_retries must be at least 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("commercetools.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(
                "commercetools.retry.initial_delay_ms cannot exceed max_delay_ms".to_string(),
            );
        }
        Ok(())
    }
}

/// commercetools API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommercetoolsConfig {
    /// Project key
    pub project_key: String,

    /// API client ID
    pub client_id: String,

    /// API client secret
    /// Stored securely in memory and automatically zeroized on drop
    pub client_secret: SecretString,

    /// OAuth authorization server URL
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// HTTP API URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// OAuth scope; defaults to `manage_project:{project_key}`
    #[serde(default)]
    pub scope: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CommercetoolsConfig {
    /// OAuth scope requested for the access token
    pub fn effective_scope(&self) -> String {
        self.scope
            .clone()
            .unwrap_or_else(|| format!("manage_project:{}", self.project_key))
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.project_key.trim().is_empty() {
            return Err("commercetools.project_key cannot be empty".to_string());
        }
        if self.client_id.trim().is_empty() {
            return Err("commercetools.client_id cannot be empty".to_string());
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err("commercetools.client_secret cannot be empty".to_string());
        }
        validate_http_url("commercetools.auth_url", &self.auth_url)?;
        validate_http_url("commercetools.api_url", &self.api_url)?;
        if self.timeout_seconds == 0 {
            return Err("commercetools.timeout_seconds must be greater than 0".to_string());
        }
        self.retry.validate()?;
        Ok(())
    }
}

/// Blob storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage target (gcs or filesystem)
    pub target: StorageTarget,

    /// Google Cloud Storage settings (required if target = gcs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs: Option<GcsConfig>,

    /// Local directory settings (required if target = filesystem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemConfig>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        match self.target {
            StorageTarget::Gcs => match self.gcs {
                Some(ref config) => config.validate(),
                None => Err("storage.gcs configuration is required when target = 'gcs'".to_string()),
            },
            StorageTarget::Filesystem => match self.filesystem {
                Some(ref config) => config.validate(),
                None => Err(
                    "storage.filesystem configuration is required when target = 'filesystem'"
                        .to_string(),
                ),
            },
        }
    }
}

/// Google Cloud Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Bucket name
    pub bucket: String,

    /// OAuth2 access token with write access to the bucket
    ///
    /// Used as-is for every upload. Google access tokens expire after about
    /// an hour, so the value has to be refreshed before each run.
    pub access_token: SecretString,

    /// Storage API base URL
    #[serde(default = "default_gcs_base_url")]
    pub base_url: String,

    /// Upload timeout in seconds
    #[serde(default = "default_upload_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GcsConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.bucket.trim().is_empty() {
            return Err("storage.gcs.bucket cannot be empty".to_string());
        }
        if self.access_token.expose_secret().is_empty() {
            return Err("storage.gcs.access_token cannot be empty".to_string());
        }
        validate_http_url("storage.gcs.base_url", &self.base_url)?;
        if self.timeout_seconds == 0 {
            return Err("storage.gcs.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Local directory storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemConfig {
    /// Root directory blobs are written below
    pub path: String,
}

impl FilesystemConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("storage.filesystem.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write the field paths as a header row
    #[serde(default)]
    pub include_header: bool,

    /// Resource types to export, in processing order
    #[serde(default)]
    pub resources: Vec<ResourceExportConfig>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.resources.is_empty() {
            return Err("At least one export resource type must be configured".to_string());
        }

        let mut seen = HashSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.resource_type) {
                return Err(format!(
                    "Resource type '{}' is configured more than once",
                    resource.resource_type
                ));
            }
            resource.validate()?;
        }
        Ok(())
    }

    /// Export specs of every configured resource type, in configured order
    pub fn export_specs(&self) -> Result<Vec<ExportSpec>, String> {
        self.resources
            .iter()
            .map(ResourceExportConfig::export_spec)
            .collect()
    }
}

/// Columns exported for one resource type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceExportConfig {
    /// Resource type (order or customer)
    pub resource_type: ResourceType,

    /// Dotted field paths, one per CSV column
    pub fields: Vec<String>,
}

impl ResourceExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err(format!(
                "Resource type '{}' has no fields configured",
                self.resource_type
            ));
        }
        self.export_spec().map(|_| ())
    }

    /// Validated export spec of this resource type
    pub fn export_spec(&self) -> Result<ExportSpec, String> {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                FieldPath::new(field.as_str())
                    .map_err(|e| format!("Resource type '{}': {e}", self.resource_type))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExportSpec::new(self.resource_type, fields))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("{name} must start with http:// or https://"));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_auth_url() -> String {
    "https://auth.europe-west1.gcp.commercetools.com".to_string()
}

fn default_api_url() -> String {
    "https://api.europe-west1.gcp.commercetools.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_gcs_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_upload_timeout_seconds() -> u64 {
    300
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn commercetools() -> CommercetoolsConfig {
        CommercetoolsConfig {
            project_key: "shop-prod".to_string(),
            client_id: "client".to_string(),
            client_secret: secret_string("secret".to_string()),
            auth_url: default_auth_url(),
            api_url: default_api_url(),
            scope: None,
            timeout_seconds: 60,
            retry: RetryConfig::default(),
        }
    }

    fn resources(entries: &[(ResourceType, &[&str])]) -> Vec<ResourceExportConfig> {
        entries
            .iter()
            .map(|(resource_type, fields)| ResourceExportConfig {
                resource_type: *resource_type,
                fields: fields.iter().map(|f| f.to_string()).collect(),
            })
            .collect()
    }

    fn config() -> DataExportConfig {
        DataExportConfig {
            application: ApplicationConfig::default(),
            commercetools: commercetools(),
            storage: StorageConfig {
                target: StorageTarget::Filesystem,
                gcs: None,
                filesystem: Some(FilesystemConfig {
                    path: "/tmp/exports".to_string(),
                }),
            },
            export: ExportConfig {
                include_header: false,
                resources: resources(&[(ResourceType::Order, &["orderNumber", "lineItems.id"])]),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_commercetools_config_validation() {
        let mut config = commercetools();
        assert!(config.validate().is_ok());

        config.project_key = "".to_string();
        assert!(config.validate().is_err());

        let mut config = commercetools();
        config.client_secret = secret_string(String::new());
        assert!(config.validate().is_err());

        let mut config = commercetools();
        config.api_url = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = commercetools();
        config.auth_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_scope() {
        let mut config = commercetools();
        assert_eq!(config.effective_scope(), "manage_project:shop-prod");

        config.scope = Some("view_orders:shop-prod".to_string());
        assert_eq!(config.effective_scope(), "view_orders:shop-prod");
    }

    #[test]
    fn test_storage_target_requires_section() {
        let mut config = config();
        config.storage.target = StorageTarget::Gcs;
        let err = config.validate().unwrap_err();
        assert!(err.contains("storage.gcs"));

        config.storage.gcs = Some(GcsConfig {
            bucket: "exports".to_string(),
            access_token: secret_string("token".to_string()),
            base_url: default_gcs_base_url(),
            timeout_seconds: 300,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_requires_resources() {
        let mut config = config();
        config.export.resources.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_rejects_resource_without_fields() {
        let mut config = config();
        config.export.resources = resources(&[(ResourceType::Customer, &[])]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("no fields"));
    }

    #[test]
    fn test_export_rejects_duplicate_resource_types() {
        let mut config = config();
        config.export.resources = resources(&[
            (ResourceType::Order, &["id"]),
            (ResourceType::Order, &["orderNumber"]),
        ]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_export_rejects_malformed_field_paths() {
        let mut config = config();
        config.export.resources = resources(&[(ResourceType::Customer, &["email", "addresses..city"])]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("customer"));
        assert!(err.contains("empty segment"));
    }

    #[test]
    fn test_export_specs_keep_order() {
        let mut config = config();
        config.export.resources = resources(&[
            (ResourceType::Customer, &["email"]),
            (ResourceType::Order, &["orderNumber", "customerId"]),
        ]);

        let specs = config.export.export_specs().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].resource_type, ResourceType::Customer);
        assert_eq!(specs[1].fields[1].as_str(), "customerId");
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.local_enabled);

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
