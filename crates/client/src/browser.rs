use std::sync::Arc;

use common::catalog::{Category, ServiceListing, SortKey};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use url::Url;

use crate::{
    api::CatalogApi,
    draft::ListingDraft,
    errors::ClientError,
    identity::IdentityProvider,
    state::{BrowseState, FetchOutcome, FetchTicket},
};

/// Async driver for the browse page.
///
/// State mutation is serialized behind a mutex that is released before the
/// network call, so several fetches may be in flight at once. The sequence
/// tag in [`BrowseState`] decides which result is shown.
pub struct Browser<A: CatalogApi + ?Sized = dyn CatalogApi> {
    api: Arc<A>,
    state: Arc<Mutex<BrowseState>>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl<A: CatalogApi + ?Sized> Clone for Browser<A> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone(), state: self.state.clone(), identity: self.identity.clone() }
    }
}

impl<A: CatalogApi + ?Sized> Browser<A> {
    /// Browser over the page at `page_url`; filters are seeded from its query.
    pub fn new(api: Arc<A>, page_url: Url) -> Self {
        Self { api, state: Arc::new(Mutex::new(BrowseState::new(page_url))), identity: None }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> BrowseState {
        self.state.lock().await.clone()
    }

    /// Initial load: exactly one fetch for the URL-seeded filter.
    pub async fn load(&self) -> FetchOutcome {
        let ticket = self.state.lock().await.begin_fetch();
        self.run(ticket).await
    }

    /// `None` when the category was already selected.
    pub async fn select_category(&self, category: Option<Category>) -> Option<FetchOutcome> {
        let ticket = self.state.lock().await.set_category(category)?;
        Some(self.run(ticket).await)
    }

    pub async fn select_sort(&self, sort: SortKey) -> Option<FetchOutcome> {
        let ticket = self.state.lock().await.set_sort(sort)?;
        Some(self.run(ticket).await)
    }

    pub async fn edit_search(&self, text: impl Into<String>) {
        self.state.lock().await.set_search_text(text);
    }

    pub async fn submit_search(&self) -> FetchOutcome {
        let ticket = self.state.lock().await.submit_search();
        self.run(ticket).await
    }

    async fn run(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.api.list_listings(&ticket.filter.to_filter()).await;
        self.state.lock().await.complete(ticket.seq, result)
    }

    pub async fn get_listing(&self, id: &str) -> Result<ServiceListing, ClientError> {
        self.api.get_listing(id).await
    }

    /// Submit the create form. Requires a signed-in identity.
    #[instrument(skip(self, draft))]
    pub async fn create_listing(&self, draft: &ListingDraft) -> Result<ServiceListing, ClientError> {
        let who = self
            .identity
            .as_ref()
            .and_then(|p| p.current_identity())
            .ok_or(ClientError::Unauthenticated)?;
        let input = draft.validate().map_err(ClientError::InvalidDraft)?;
        let created = self.api.create_listing(&input).await?;
        info!(id = %created.id, user_id = %who.id, "listing_submitted");
        Ok(created)
    }
}
