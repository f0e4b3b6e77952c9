//! Exportable resource types and per-type outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource types that can be exported
///
/// The declaration order is the processing order when several types are
/// exported in one run without an explicit order.
///
/// # Examples
///
/// ```
/// use dataexport::domain::ResourceType;
/// use std::str::FromStr;
///
/// let resource_type = ResourceType::from_str("order").unwrap();
/// assert_eq!(resource_type, ResourceType::Order);
/// assert_eq!(resource_type.name(), "order");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Orders, expanded per line item
    Order,
    /// Customers, expanded per address
    Customer,
}

impl ResourceType {
    /// All known resource types
    pub const ALL: [ResourceType; 2] = [ResourceType::Order, ResourceType::Customer];

    /// Lowercase singular name used in logs and blob names
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Order => "order",
            ResourceType::Customer => "customer",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "order" | "orders" => Ok(ResourceType::Order),
            "customer" | "customers" => Ok(ResourceType::Customer),
            _ => Err(format!(
                "Unsupported resource type: {s}. Expected 'order' or 'customer'"
            )),
        }
    }
}

/// Outcome of exporting one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportOutcome {
    /// All pages fetched, all rows written and the payload uploaded
    Success,
    /// Something failed; nothing was uploaded
    Failed,
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::Success => f.write_str("SUCCESS"),
            ExportOutcome::Failed => f.write_str("FAILED"),
        }
    }
}
