use chrono::Utc;
use common::catalog::{Category, NewListing, ServiceListing};
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_listing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// Unicode-lowercased `name`, matched by search.
    #[sea_orm(column_type = "Text")]
    pub name_search: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub description_search: String,
    pub category: Category,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub duration_minutes: i32,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
    pub is_available: bool,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServiceListing {
    fn from(m: Model) -> Self {
        ServiceListing {
            id: m.id,
            name: m.name,
            description: m.description,
            category: m.category,
            price: m.price,
            duration_minutes: m.duration_minutes,
            image_url: m.image_url,
            is_available: m.is_available,
            rating: m.rating,
            review_count: m.review_count,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Last line of defence for the numeric invariants; the service layer
/// reports field-level messages before this is reached.
pub fn validate(listing: &NewListing) -> Result<(), ModelError> {
    if listing.name.trim().is_empty() {
        return Err(ModelError::Validation("name must not be empty".into()));
    }
    if !(listing.price.is_finite() && listing.price >= 0.0) {
        return Err(ModelError::Validation("price must be non-negative".into()));
    }
    if listing.duration_minutes < 0 || listing.review_count < 0 {
        return Err(ModelError::Validation("duration and review count must be non-negative".into()));
    }
    if !(0.0..=5.0).contains(&listing.rating) {
        return Err(ModelError::Validation("rating must be within 0..=5".into()));
    }
    Ok(())
}

/// Insert a listing with a fresh id and creation timestamps.
pub async fn create(db: &DatabaseConnection, listing: NewListing) -> Result<Model, ModelError> {
    validate(&listing)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name_search: Set(listing.name.to_lowercase()),
        description_search: Set(listing.description.to_lowercase()),
        name: Set(listing.name),
        description: Set(listing.description),
        category: Set(listing.category),
        price: Set(listing.price),
        duration_minutes: Set(listing.duration_minutes),
        image_url: Set(listing.image_url),
        is_available: Set(listing.is_available),
        rating: Set(listing.rating),
        review_count: Set(listing.review_count),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
