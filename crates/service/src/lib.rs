//! Service layer for the listing catalog.
//! - Validation and query normalization live here, persistence behind `ListingRepository`.
//! - Entity definitions come from the `models` crate.

pub mod catalog;
pub mod errors;
#[cfg(test)]
pub mod test_support;

pub use catalog::{CatalogService, ListingPage};
pub use errors::ServiceError;
