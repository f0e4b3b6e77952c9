//! Result type alias for dataexport

use super::errors::DataExportError;

/// Result type alias for dataexport operations
///
/// # Examples
///
/// ```
/// use dataexport::domain::result::Result;
/// use dataexport::domain::errors::DataExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DataExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DataExportError>;
