//! Field path resolution against a document
//!
//! A path is walked segment by segment: objects are indexed by key, lists by
//! a decimal index. Anything that does not match (missing key, index out of
//! range, descending into a scalar) resolves to the empty string. A miss is
//! a normal outcome and never an error.

use crate::domain::{Document, PATH_SEPARATOR};
use serde_json::Value;

/// Discriminator value of the money type handled by [`normalize`]
pub const MONEY_TYPE_TAG: &str = "centPrecision";

/// Resolve a dotted field path to its CSV cell value
///
/// # Examples
///
/// ```
/// use dataexport::core::transform::resolve::resolve;
/// use serde_json::json;
///
/// let order = json!({
///     "orderNumber": "12345",
///     "totalPrice": {"type": "centPrecision", "currencyCode": "CHF", "centAmount": 195},
///     "lineItems": [{"quantity": 2}]
/// });
///
/// assert_eq!(resolve(&order, "orderNumber"), "12345");
/// assert_eq!(resolve(&order, "totalPrice"), "1.95");
/// assert_eq!(resolve(&order, "lineItems.0.quantity"), "2");
/// assert_eq!(resolve(&order, "shippingAddress.city"), "");
/// ```
pub fn resolve(document: &Document, field_path: &str) -> String {
    lookup(document, field_path)
        .map(normalize)
        .unwrap_or_default()
}

/// Find the node a dotted path points at, if any
pub fn lookup<'a>(document: &'a Document, field_path: &str) -> Option<&'a Value> {
    field_path
        .split(PATH_SEPARATOR)
        .try_fold(document, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => parse_index(segment).and_then(|index| items.get(index)),
            _ => None,
        })
}

/// Convert a resolved node to its cell text
///
/// Money objects become a decimal amount, scalars their natural text, and
/// null, lists and other objects the empty string.
pub fn normalize(value: &Value) -> String {
    if is_money(value) {
        return value
            .get("centAmount")
            .and_then(Value::as_i64)
            .map(format_cent_amount)
            .unwrap_or_default();
    }

    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Whether a node is a minor-unit money amount
pub fn is_money(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(MONEY_TYPE_TAG)
}

/// Format a minor-unit amount as `amount / 100`
///
/// The result always carries at least one fractional digit and drops a
/// trailing zero in the second one: `100` → `1.0`, `150` → `1.5`,
/// `195` → `1.95`, `5` → `0.05`.
pub fn format_cent_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = abs / 100;
    let fraction = abs % 100;

    if fraction % 10 == 0 {
        format!("{sign}{whole}.{}", fraction / 10)
    } else {
        format!("{sign}{whole}.{fraction:02}")
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
