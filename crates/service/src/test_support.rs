#![cfg(test)]
use std::{sync::Arc, time::Duration};

use common::catalog::{ListingInput, ServiceListing};
use sea_orm::DatabaseConnection;

use crate::catalog::{CatalogService, ListingRepository, SeaOrmListingRepository};

/// Fresh migrated in-memory SQLite database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_sqlite_memory().await?;
    models::db::migrate(&db).await?;
    Ok(db)
}

pub async fn sqlite_service() -> Result<(CatalogService<SeaOrmListingRepository>, DatabaseConnection), anyhow::Error> {
    let db = get_db().await?;
    let svc = CatalogService::new(Arc::new(SeaOrmListingRepository::new(db.clone())));
    Ok((svc, db))
}

pub fn listing_input(name: &str, category: &str, price: f64) -> ListingInput {
    ListingInput {
        name: Some(name.into()),
        description: Some(format!("{name} service")),
        category: Some(category.into()),
        price: Some(price),
        duration_minutes: Some(60),
        image_url: Some("https://example.com/img.jpg".into()),
        ..Default::default()
    }
}

/// A(10, 4.5, "Deep Clean"), B(25, 3, "Pipe Fix"), C(15, 5, "clean Gutter"),
/// created in that order.
pub async fn seed_scenario<R: ListingRepository + ?Sized>(
    svc: &CatalogService<R>,
) -> Result<Vec<ServiceListing>, anyhow::Error> {
    let rows = [
        ("Deep Clean", "Cleaning", 10.0, 4.5),
        ("Pipe Fix", "Plumbing", 25.0, 3.0),
        ("clean Gutter", "Cleaning", 15.0, 5.0),
    ];
    let mut created = Vec::with_capacity(rows.len());
    for (name, category, price, rating) in rows {
        let mut input = listing_input(name, category, price);
        input.rating = Some(rating);
        created.push(svc.create_listing(input).await?);
        // Distinct creation timestamps for newest-first ordering
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Ok(created)
}
