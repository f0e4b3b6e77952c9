//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DataExportConfig, StorageTarget};
use crate::config::secret_string;
use crate::domain::errors::DataExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DataExportConfig
/// 4. Applies environment variable overrides (DATAEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dataexport::config::loader::load_config;
///
/// let config = load_config("dataexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DataExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DataExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DataExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as [`load_config`].
pub fn parse_config(contents: &str) -> Result<DataExportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DataExportConfig = toml::from_str(&contents)
        .map_err(|e| DataExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DataExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DataExportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DataExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DATAEXPORT_* prefix
///
/// Environment variables follow the pattern: DATAEXPORT_<SECTION>_<KEY>
/// For example: DATAEXPORT_COMMERCETOOLS_PROJECT_KEY, DATAEXPORT_GCS_BUCKET
///
/// An override that cannot be applied is an error, so it is never silently
/// dropped.
fn apply_env_overrides(config: &mut DataExportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("DATAEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("DATAEXPORT_APPLICATION_DRY_RUN", &val)?;
    }

    // commercetools overrides
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_PROJECT_KEY") {
        config.commercetools.project_key = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_CLIENT_ID") {
        config.commercetools.client_id = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_CLIENT_SECRET") {
        config.commercetools.client_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_AUTH_URL") {
        config.commercetools.auth_url = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_API_URL") {
        config.commercetools.api_url = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_COMMERCETOOLS_TIMEOUT_SECONDS") {
        config.commercetools.timeout_seconds =
            parse_override("DATAEXPORT_COMMERCETOOLS_TIMEOUT_SECONDS", &val)?;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("DATAEXPORT_STORAGE_TARGET") {
        match val.to_lowercase().as_str() {
            "gcs" => config.storage.target = StorageTarget::Gcs,
            "filesystem" => config.storage.target = StorageTarget::Filesystem,
            _ => {
                return Err(DataExportError::Configuration(format!(
                    "DATAEXPORT_STORAGE_TARGET must be 'gcs' or 'filesystem', got '{val}'"
                )))
            }
        }
    }
    if let Some(ref mut gcs) = config.storage.gcs {
        if let Ok(val) = std::env::var("DATAEXPORT_GCS_BUCKET") {
            gcs.bucket = val;
        }
        if let Ok(val) = std::env::var("DATAEXPORT_GCS_ACCESS_TOKEN") {
            gcs.access_token = secret_string(val);
        }
        if let Ok(val) = std::env::var("DATAEXPORT_GCS_BASE_URL") {
            gcs.base_url = val;
        }
    }
    if let Some(ref mut filesystem) = config.storage.filesystem {
        if let Ok(val) = std::env::var("DATAEXPORT_FILESYSTEM_PATH") {
            filesystem.path = val;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("DATAEXPORT_EXPORT_INCLUDE_HEADER") {
        config.export.include_header =
            parse_override("DATAEXPORT_EXPORT_INCLUDE_HEADER", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DATAEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("DATAEXPORT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DATAEXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        DataExportError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceType;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_TOML: &str = r#"
[application]
log_level = "info"

[commercetools]
project_key = "shop-prod"
client_id = "client"
client_secret = "secret"

[storage]
target = "gcs"

[storage.gcs]
bucket = "exports"
access_token = "token"

[[export.resources]]
resource_type = "order"
fields = ["orderNumber", "totalPrice", "lineItems.id", "lineItems.variant.attributes.color"]

[[export.resources]]
resource_type = "customer"
fields = ["email", "addresses.city"]
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DATAEXPORT_LOADER_TEST_VAR", "test_value");
        let input = "client_secret = \"${DATAEXPORT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "client_secret = \"test_value\"\n");
        std::env::remove_var("DATAEXPORT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_parse_override() {
        assert!(parse_override::<bool>("DATAEXPORT_APPLICATION_DRY_RUN", " true ").unwrap());
        assert_eq!(
            parse_override::<u64>("DATAEXPORT_COMMERCETOOLS_TIMEOUT_SECONDS", "90").unwrap(),
            90
        );

        let err = parse_override::<bool>("DATAEXPORT_EXPORT_INCLUDE_HEADER", "yes").unwrap_err();
        assert!(err.to_string().contains("DATAEXPORT_EXPORT_INCLUDE_HEADER"));
        assert!(err.to_string().contains("'yes'"));
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DATAEXPORT_LOADER_MISSING_VAR");
        let input = "client_secret = \"${DATAEXPORT_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("DATAEXPORT_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# client_secret = \"${DATAEXPORT_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(DataExportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_TOML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.commercetools.project_key, "shop-prod");
        assert_eq!(config.commercetools.client_secret.expose_secret(), "secret");
        assert_eq!(config.storage.target, StorageTarget::Gcs);
        assert!(!config.export.include_header);

        let specs = config.export.export_specs().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].resource_type, ResourceType::Order);
        assert_eq!(specs[0].fields.len(), 4);
        assert_eq!(specs[1].resource_type, ResourceType::Customer);
    }

    #[test]
    fn test_parse_config_rejects_unknown_resource_type() {
        let toml = VALID_TOML.replace("resource_type = \"customer\"", "resource_type = \"cart\"");
        let result = parse_config(&toml);
        assert!(matches!(result, Err(DataExportError::Configuration(_))));
    }

    #[test]
    fn test_parse_config_rejects_missing_storage_section() {
        let toml = VALID_TOML.replace("[storage.gcs]", "[storage.other]");
        let err = parse_config(&toml).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
