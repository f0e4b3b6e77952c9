//! Record to CSV row transformation
//!
//! - [`resolve`] - dotted field path lookup and cell normalization (money aware)
//! - [`attributes`] - lookup of dynamically named `{name, value}` attributes
//! - [`flatten`] - expansion of one record into flat, parent and child rows

pub mod attributes;
pub mod flatten;
pub mod resolve;

pub use attributes::{resolve_attribute, AttributeBag};
pub use flatten::{FlattenedRows, Row, RowFlattener, RowKind, RowLayout};
pub use resolve::{format_cent_amount, resolve, MONEY_TYPE_TAG};
