use std::sync::Arc;

use common::catalog::{CategoryFilter, ListingFilter, ListingInput, ListingQuery, ServiceListing};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::catalog::repository::ListingRepository;
use crate::errors::ServiceError;

/// One page of listing results. There is no pagination; `count == data.len()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListingPage {
    pub count: usize,
    pub data: Vec<ServiceListing>,
}

/// Catalog business service, independent of web framework.
pub struct CatalogService<R: ListingRepository + ?Sized = dyn ListingRepository> {
    repo: Arc<R>,
}

impl<R: ListingRepository + ?Sized> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone() }
    }
}

impl CatalogService {
    /// Type-erased service as shared by the HTTP layer.
    pub fn shared(repo: Arc<dyn ListingRepository>) -> Self { Self { repo } }
}

impl<R: ListingRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and persist a new listing.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::catalog::ListingInput;
    /// use service::catalog::{memory::InMemoryListingRepository, CatalogService};
    ///
    /// let svc = CatalogService::new(Arc::new(InMemoryListingRepository::default()));
    /// let input: ListingInput = serde_json::from_str(r#"{
    ///     "name": "Deep Clean", "description": "Whole flat", "category": "Cleaning",
    ///     "price": 10, "durationMinutes": 120, "imageUrl": "https://example.com/a.jpg"
    /// }"#).unwrap();
    /// let created = tokio_test::block_on(svc.create_listing(input)).unwrap();
    /// assert!(created.is_available);
    /// assert_eq!(created.rating, 0.0);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_listing(&self, input: ListingInput) -> Result<ServiceListing, ServiceError> {
        let listing = input.validated().map_err(|errors| {
            debug!(%errors, "listing_rejected");
            ServiceError::Validation(errors)
        })?;
        let created = self.repo.insert(listing).await?;
        info!(id = %created.id, category = %created.category, "listing_created");
        Ok(created)
    }

    /// Listings matching `filter`, sorted. An empty result is not an error.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::catalog::ListingFilter;
    /// use service::catalog::{memory::InMemoryListingRepository, CatalogService};
    ///
    /// let svc = CatalogService::new(Arc::new(InMemoryListingRepository::default()));
    /// let page = tokio_test::block_on(svc.list_listings(&ListingFilter::default())).unwrap();
    /// assert_eq!(page.count, 0);
    /// ```
    #[instrument(skip(self, filter), fields(category = ?filter.category, sort = ?filter.sort, search = ?filter.search))]
    pub async fn list_listings(&self, filter: &ListingFilter) -> Result<ListingPage, ServiceError> {
        let query = ListingQuery::from(filter);
        if let CategoryFilter::Unmatched(raw) = &query.category {
            debug!(category = %raw, "unknown category, empty result");
            return Ok(ListingPage::default());
        }
        let data = self.repo.find(&query).await?;
        debug!(count = data.len(), "listings_fetched");
        Ok(ListingPage { count: data.len(), data })
    }

    #[instrument(skip(self))]
    pub async fn get_listing(&self, id: &str) -> Result<ServiceListing, ServiceError> {
        let parsed = Uuid::parse_str(id.trim()).map_err(|_| ServiceError::InvalidId(id.to_string()))?;
        self.repo
            .find_by_id(parsed)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))
    }
}
