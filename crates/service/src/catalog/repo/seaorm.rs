use common::catalog::{FieldErrors, ListingQuery, NewListing, ServiceListing};
use models::errors::ModelError;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::catalog::query::build_select;
use crate::catalog::repository::ListingRepository;
use crate::errors::ServiceError;

pub struct SeaOrmListingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmListingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ListingRepository for SeaOrmListingRepository {
    async fn insert(&self, listing: NewListing) -> Result<ServiceListing, ServiceError> {
        let created = models::service_listing::create(&self.db, listing).await.map_err(|e| match e {
            ModelError::Validation(msg) => ServiceError::Validation(FieldErrors::single("listing", &msg)),
            other => ServiceError::Model(other),
        })?;
        Ok(created.into())
    }

    async fn find(&self, query: &ListingQuery) -> Result<Vec<ServiceListing>, ServiceError> {
        let rows = build_select(query)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(ServiceListing::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError> {
        let row = models::service_listing::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(row.map(ServiceListing::from))
    }
}
