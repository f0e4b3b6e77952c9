//! commercetools resource source
//!
//! - [`source`] - the [`ResourceSource`] trait consumed by the export coordinator
//! - [`client`] - HTTP implementation against the commercetools API
//! - [`models`] - token and paged query response bodies

pub mod client;
pub mod models;
pub mod source;

pub use client::CommercetoolsClient;
pub use models::{PagedQueryResponse, TokenResponse};
pub use source::{page_count, ResourcePage, ResourceSource};
