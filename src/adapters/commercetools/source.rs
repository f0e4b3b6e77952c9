//! Resource source abstraction
//!
//! The export coordinator only sees pages of JSON documents. Anything that can
//! answer a paged query for a resource type can feed an export.

use crate::domain::{Document, ResourceType, Result};
use async_trait::async_trait;

/// One page of a paged resource query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePage {
    /// Records on this page, in sort order
    pub records: Vec<Document>,

    /// Total number of pages for the query at the requested limit
    pub total_pages: u64,
}

impl ResourcePage {
    /// Create a page from its records and the page count of the whole query
    pub fn new(records: Vec<Document>, total_pages: u64) -> Self {
        Self {
            records,
            total_pages,
        }
    }
}

/// Paged access to a collection of resources
///
/// Implementations must return records in a stable sort order so that pages
/// requested at increasing offsets neither overlap nor skip records.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch the page of `resource_type` starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn fetch_page(
        &self,
        resource_type: ResourceType,
        offset: u64,
        limit: u64,
    ) -> Result<ResourcePage>;
}

/// Number of pages needed to hold `total` records at `limit` per page
pub fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
