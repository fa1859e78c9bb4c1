//! Catalog vocabulary: categories, sort keys, listing records and the
//! filter/query types that narrow a listing search.

pub mod category;
pub mod input;
pub mod listing;
pub mod query;
pub mod sort;

pub use category::{Category, UnknownCategory};
pub use input::{FieldError, FieldErrors, ListingInput, NewListing};
pub use listing::ServiceListing;
pub use query::{CategoryFilter, ListingFilter, ListingQuery};
pub use sort::SortKey;
