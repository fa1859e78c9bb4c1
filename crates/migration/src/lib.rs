//! Migrator for the catalog schema. Indexes are applied after the table.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_service_listing;
mod m20240101_000002_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_service_listing::Migration),
            Box::new(m20240101_000002_add_listing_indexes::Migration),
        ]
    }
}
