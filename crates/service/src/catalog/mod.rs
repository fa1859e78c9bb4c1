//! Catalog module: query builder, repository and service.

pub mod query;
pub mod repo;
pub mod repository;
pub mod service;

pub use repository::{memory, ListingRepository};
pub use repo::seaorm::SeaOrmListingRepository;
pub use service::{CatalogService, ListingPage};
