//! Field paths and export specs
//!
//! A field path is a dotted string selecting a value inside a record, e.g.
//! `lineItems.variant.attributes.color`. There is no escaping mechanism, so
//! keys containing a literal `.` cannot be addressed; paths are validated
//! when the configuration is loaded instead of being mis-parsed later.

use super::resource::ResourceType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment separator inside a field path
pub const PATH_SEPARATOR: char = '.';

/// Validated dotted field path
///
/// # Examples
///
/// ```
/// use dataexport::domain::FieldPath;
///
/// let path = FieldPath::new("lineItems.quantity").unwrap();
/// assert_eq!(path.segments().collect::<Vec<_>>(), vec!["lineItems", "quantity"]);
///
/// assert!(FieldPath::new("lineItems..quantity").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a new field path, rejecting malformed input
    ///
    /// A valid path is non-empty ASCII without whitespace, and none of its
    /// segments is empty.
    pub fn new(path: impl Into<String>) -> Result<Self, String> {
        let path = path.into();
        if path.is_empty() {
            return Err("Field path cannot be empty".to_string());
        }
        if let Some(c) = path
            .chars()
            .find(|c| !c.is_ascii() || c.is_ascii_whitespace() || c.is_ascii_control())
        {
            return Err(format!(
                "Field path '{path}' contains unsupported character {c:?}"
            ));
        }
        if path.split(PATH_SEPARATOR).any(str::is_empty) {
            return Err(format!(
                "Field path '{path}' contains an empty segment"
            ));
        }
        Ok(Self(path))
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the dot-separated segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Columns requested for one resource type
///
/// Column order is significant: column `i` of every emitted row holds
/// `fields[i]`, whether the row is flat, a parent row or a child row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    /// Resource type to export
    pub resource_type: ResourceType,

    /// Ordered field paths, one per CSV column
    pub fields: Vec<FieldPath>,
}

impl ExportSpec {
    /// Creates a new export spec
    pub fn new(resource_type: ResourceType, fields: Vec<FieldPath>) -> Self {
        Self {
            resource_type,
            fields,
        }
    }

    /// Builds a spec from raw strings, validating every path
    pub fn parse<I, S>(resource_type: ResourceType, fields: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(FieldPath::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(resource_type, fields))
    }

    /// Number of columns in every row
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}
