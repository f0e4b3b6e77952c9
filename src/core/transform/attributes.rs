//! Dynamic attribute lookup
//!
//! Product variants carry user-defined attributes as a list of
//! `{name, value}` pairs instead of fixed fields. A child field such as
//! `lineItems.variant.attributes.color` is resolved by scanning that list
//! for the first pair named `color`. Anything after the attribute name is
//! resolved inside the pair's value, e.g. `supplierCategory.obj.key`.

use super::resolve::{lookup, normalize, resolve};
use crate::domain::{Document, PATH_SEPARATOR};
use serde_json::Value;

/// Location and path prefix of an attribute list inside a collection element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBag {
    /// Prefix marking attribute paths, relative to the element (`variant.attributes.`)
    prefix: String,
    /// Path of the `{name, value}` list inside the element (`variant.attributes`)
    location: String,
}

impl AttributeBag {
    /// Creates a bag stored at `location`; paths starting with `location.` use it
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let location = location
            .strip_suffix(PATH_SEPARATOR)
            .map(str::to_string)
            .unwrap_or(location);
        Self {
            prefix: format!("{location}{PATH_SEPARATOR}"),
            location,
        }
    }

    /// Attributes of a line item's product variant
    pub fn variant_attributes() -> Self {
        Self::new("variant.attributes")
    }

    /// Path prefix, including the trailing separator
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strips the bag prefix from an element-relative path, if it has it
    pub fn strip<'p>(&self, element_path: &'p str) -> Option<&'p str> {
        element_path.strip_prefix(self.prefix.as_str())
    }

    /// Resolve `attribute_path` (the part after the prefix) against an element
    pub fn resolve(&self, element: &Document, attribute_path: &str) -> String {
        if attribute_path.trim().is_empty() {
            return String::new();
        }

        let (name, nested_path) = match attribute_path.split_once(PATH_SEPARATOR) {
            Some((name, rest)) => (name, Some(rest)),
            None => (attribute_path, None),
        };

        let Some(attributes) = lookup(element, &self.location).and_then(Value::as_array) else {
            return String::new();
        };

        let Some(attribute) = attributes
            .iter()
            .find(|attribute| attribute.get("name").and_then(Value::as_str) == Some(name))
        else {
            return String::new();
        };

        let value = attribute.get("value").unwrap_or(&Value::Null);
        match nested_path {
            None => normalize(value),
            Some(path) => resolve(value, path),
        }
    }
}

/// Resolve an attribute of a line item's variant
///
/// # Examples
///
/// ```
/// use dataexport::core::transform::attributes::resolve_attribute;
/// use serde_json::json;
///
/// let line_item = json!({
///     "variant": {"attributes": [{"name": "color", "value": "red"}]}
/// });
///
/// assert_eq!(resolve_attribute(&line_item, "color"), "red");
/// assert_eq!(resolve_attribute(&line_item, "size"), "");
/// ```
pub fn resolve_attribute(element: &Document, attribute_path: &str) -> String {
    AttributeBag::variant_attributes().resolve(element, attribute_path)
}
