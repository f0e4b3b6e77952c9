//! Resource type registration table
//!
//! Everything type-specific about a resource lives in one [`ResourceDescriptor`]:
//! the API endpoint it is fetched from and the row layout it is flattened
//! with. Supporting a new resource type means adding a [`ResourceType`]
//! variant and one entry here.

use crate::core::transform::{AttributeBag, RowLayout};
use crate::domain::ResourceType;

/// Fixed page size for paginated fetches
pub const PAGE_SIZE: u64 = 50;

/// Sort order that keeps pages stable and non-overlapping
pub const SORT_ORDER: &str = "createdAt desc";

/// Type-specific export settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Resource type
    pub resource_type: ResourceType,

    /// Path segment of the collection endpoint (`orders`, `customers`)
    pub endpoint: &'static str,

    /// Collection expanded into child rows (`lineItems`, `addresses`)
    pub nested_collection: &'static str,

    /// Location of dynamic attributes inside collection elements
    pub attribute_bag: Option<&'static str>,
}

impl ResourceDescriptor {
    /// Row layout used to flatten records of this type
    pub fn row_layout(&self) -> RowLayout {
        let layout = RowLayout::new(self.nested_collection);
        match self.attribute_bag {
            Some(location) => layout.with_attribute_bag(AttributeBag::new(location)),
            None => layout,
        }
    }
}

static ORDER: ResourceDescriptor = ResourceDescriptor {
    resource_type: ResourceType::Order,
    endpoint: "orders",
    nested_collection: "lineItems",
    attribute_bag: Some("variant.attributes"),
};

static CUSTOMER: ResourceDescriptor = ResourceDescriptor {
    resource_type: ResourceType::Customer,
    endpoint: "customers",
    nested_collection: "addresses",
    attribute_bag: None,
};

/// Look up the descriptor of a resource type
pub fn descriptor(resource_type: ResourceType) -> &'static ResourceDescriptor {
    match resource_type {
        ResourceType::Order => &ORDER,
        ResourceType::Customer => &CUSTOMER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_resource_type_is_registered() {
        for resource_type in ResourceType::ALL {
            assert_eq!(descriptor(resource_type).resource_type, resource_type);
        }
    }

    #[test]
    fn test_order_layout() {
        let layout = descriptor(ResourceType::Order).row_layout();
        assert_eq!(layout.nested_collection_prefix(), "lineItems.");
        assert_eq!(
            layout.attribute_bag().map(AttributeBag::prefix),
            Some("variant.attributes.")
        );
    }

    #[test]
    fn test_customer_layout() {
        let customer = descriptor(ResourceType::Customer);
        assert_eq!(customer.endpoint, "customers");

        let layout = customer.row_layout();
        assert_eq!(layout.nested_collection_prefix(), "addresses.");
        assert!(layout.attribute_bag().is_none());
    }
}
