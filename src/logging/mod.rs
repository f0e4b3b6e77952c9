//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (overridable with `RUST_LOG`)
//! - Console output
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use dataexport::logging::init_logging;
//! use dataexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(resource_type = "order", "Exporting resource type");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a resource type export
///
/// # Example
///
/// ```no_run
/// use dataexport::log_export_start;
/// use dataexport::domain::ResourceType;
///
/// log_export_start!(ResourceType::Order, 4);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($resource_type:expr, $columns:expr) => {
        tracing::info!(
            resource_type = %$resource_type,
            columns = $columns,
            "Exporting resource type"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use dataexport::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 2000, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Request failed, retrying with exponential backoff"
        );
    };
}
