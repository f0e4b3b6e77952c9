//! commercetools API response models

use crate::adapters::commercetools::source::{page_count, ResourcePage};
use crate::domain::Document;
use serde::Deserialize;

/// OAuth2 client credentials token response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime in seconds
    pub expires_in: u64,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,
}

/// Paged query response (`PagedQueryResponse` in the commercetools API)
#[derive(Debug, Deserialize)]
pub struct PagedQueryResponse {
    pub limit: u64,

    pub offset: u64,

    pub count: u64,

    /// Present when the query was sent with `withTotal=true`
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub results: Vec<Document>,
}

impl PagedQueryResponse {
    /// Convert into a page, computing the page count at `limit`
    ///
    /// Without a total the query is assumed to end on this page.
    pub fn into_page(self, limit: u64) -> ResourcePage {
        let total = self.total.unwrap_or(self.offset + self.count);
        ResourcePage::new(self.results, page_count(total, limit))
    }
}
