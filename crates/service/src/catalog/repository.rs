use async_trait::async_trait;
use common::catalog::{ListingQuery, NewListing, ServiceListing};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Persistence abstraction for listings. Listings are insert-only.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn insert(&self, listing: NewListing) -> Result<ServiceListing, ServiceError>;
    /// Matching listings in the query's total order.
    async fn find(&self, query: &ListingQuery) -> Result<Vec<ServiceListing>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError>;
}

/// In-memory repository for tests, doc examples and local demos.
/// Filtering and ordering use the same predicates as the SQL query builder.
pub mod memory {
    use super::*;
    use chrono::Utc;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryListingRepository {
        listings: RwLock<Vec<ServiceListing>>,
    }

    impl InMemoryListingRepository {
        pub async fn len(&self) -> usize {
            self.listings.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.listings.read().await.is_empty()
        }
    }

    #[async_trait]
    impl ListingRepository for InMemoryListingRepository {
        async fn insert(&self, listing: NewListing) -> Result<ServiceListing, ServiceError> {
            let now = Utc::now();
            let created = ServiceListing {
                id: Uuid::new_v4(),
                name: listing.name,
                description: listing.description,
                category: listing.category,
                price: listing.price,
                duration_minutes: listing.duration_minutes,
                image_url: listing.image_url,
                is_available: listing.is_available,
                rating: listing.rating,
                review_count: listing.review_count,
                created_at: now,
                updated_at: now,
            };
            self.listings.write().await.push(created.clone());
            Ok(created)
        }

        async fn find(&self, query: &ListingQuery) -> Result<Vec<ServiceListing>, ServiceError> {
            let snapshot = self.listings.read().await.clone();
            Ok(query.apply(snapshot))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError> {
            Ok(self.listings.read().await.iter().find(|l| l.id == id).cloned())
        }
    }
}
