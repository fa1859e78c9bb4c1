use crate::{db, errors::ModelError, service_listing};
use anyhow::Result;
use common::catalog::{Category, NewListing, ServiceListing};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = db::connect_sqlite_memory().await?;
    db::migrate(&db).await?;
    Ok(db)
}

fn new_listing(name: &str, category: Category) -> NewListing {
    NewListing {
        name: name.into(),
        description: "Fast and tidy".into(),
        category,
        price: 19.5,
        duration_minutes: 90,
        image_url: "https://example.com/a.png".into(),
        is_available: true,
        rating: 4.5,
        review_count: 3,
    }
}

#[tokio::test]
async fn test_create_and_read_back() -> Result<()> {
    let db = setup_test_db().await?;

    let created = service_listing::create(&db, new_listing("Deep Clean", Category::Cleaning)).await?;
    assert_eq!(created.created_at, created.updated_at);

    let found = service_listing::find_by_id(&db, created.id).await?.expect("present");
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Deep Clean");

    let dto = ServiceListing::from(found);
    assert_eq!(dto.category, Category::Cleaning);
    assert_eq!(dto.price, 19.5);
    assert_eq!(dto.duration_minutes, 90);

    assert!(service_listing::find_by_id(&db, Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_category_round_trips_as_text() -> Result<()> {
    let db = setup_test_db().await?;
    for c in Category::ALL {
        service_listing::create(&db, new_listing(c.as_str(), c)).await?;
    }
    let plumbing = service_listing::Entity::find()
        .filter(service_listing::Column::Category.eq(Category::Plumbing))
        .all(&db)
        .await?;
    assert_eq!(plumbing.len(), 1);
    assert_eq!(plumbing[0].name, "Plumbing");
    Ok(())
}

#[tokio::test]
async fn test_rejects_invariant_violations() -> Result<()> {
    let db = setup_test_db().await?;

    let mut bad = new_listing("x", Category::Other);
    bad.price = -0.01;
    assert!(matches!(service_listing::create(&db, bad).await, Err(ModelError::Validation(_))));

    let mut bad = new_listing("x", Category::Other);
    bad.rating = 5.1;
    assert!(matches!(service_listing::create(&db, bad).await, Err(ModelError::Validation(_))));

    assert!(service_listing::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_columns_hold_lowercased_text() -> Result<()> {
    let db = setup_test_db().await?;
    let mut listing = new_listing("ÉLAGAGE Jardin", Category::Gardening);
    listing.description = "Taille des HAIES".into();

    let created = service_listing::create(&db, listing).await?;
    assert_eq!(created.name, "ÉLAGAGE Jardin");
    assert_eq!(created.name_search, "élagage jardin");
    assert_eq!(created.description_search, "taille des haies");
    Ok(())
}

#[tokio::test]
async fn test_long_free_text_is_stored_whole() -> Result<()> {
    let db = setup_test_db().await?;
    let mut listing = new_listing(&"n".repeat(500), Category::Other);
    listing.image_url = format!("https://example.com/{}.png", "p".repeat(3000));

    let created = service_listing::create(&db, listing).await?;
    let found = service_listing::find_by_id(&db, created.id).await?.expect("present");
    assert_eq!(found.name.len(), 500);
    assert!(found.image_url.len() > 3000);
    Ok(())
}
