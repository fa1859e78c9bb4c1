//! Browse page state machine. Performs no I/O: every fetch is described by a
//! [`FetchTicket`] and its result is fed back through [`BrowseState::complete`].

use common::catalog::{Category, ServiceListing, SortKey};
use tracing::{debug, warn};
use url::Url;

use crate::{errors::ClientError, filter::FilterState};

/// Shown in place of results when the latest fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load services. Please try again later.";

/// A fetch to perform. Only the response to the most recently issued ticket
/// is ever applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub filter: FilterState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued before this one completed; result discarded.
    Stale,
}

#[derive(Clone, Debug)]
pub struct BrowseState {
    filter: FilterState,
    url: Url,
    listings: Vec<ServiceListing>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl BrowseState {
    /// State seeded from the page URL. Nothing is fetched until
    /// [`BrowseState::begin_fetch`] is called.
    pub fn new(url: Url) -> Self {
        Self { filter: FilterState::from_url(&url), url, listings: Vec::new(), loading: false, error: None, issued: 0 }
    }

    pub fn filter(&self) -> &FilterState { &self.filter }

    pub fn url(&self) -> &Url { &self.url }

    pub fn listings(&self) -> &[ServiceListing] { &self.listings }

    pub fn loading(&self) -> bool { self.loading }

    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    /// Sequence number of the latest issued fetch, 0 before the first.
    pub fn latest_seq(&self) -> u64 { self.issued }

    /// Sync the URL to the complete filter and issue a fetch for it.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.filter.write_to_url(&mut self.url);
        debug!(seq = self.issued, url = %self.url, "fetch issued");
        FetchTicket { seq: self.issued, filter: self.filter.clone() }
    }

    /// Live filter. Fetches only when the category actually changes.
    pub fn set_category(&mut self, category: Option<Category>) -> Option<FetchTicket> {
        if self.filter.category == category {
            return None;
        }
        self.filter.category = category;
        Some(self.begin_fetch())
    }

    /// Live filter. Fetches only when the sort actually changes.
    pub fn set_sort(&mut self, sort: SortKey) -> Option<FetchTicket> {
        if self.filter.sort == sort {
            return None;
        }
        self.filter.sort = sort;
        Some(self.begin_fetch())
    }

    /// Search edits are held until [`BrowseState::submit_search`].
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
    }

    pub fn submit_search(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Apply the result of fetch `seq` unless a newer fetch has been issued.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<ServiceListing>, ClientError>) -> FetchOutcome {
        if seq != self.issued {
            debug!(seq, latest = self.issued, "stale fetch discarded");
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(listings) => {
                self.listings = listings;
                self.error = None;
            }
            Err(e) => {
                warn!(seq, error = %e, "failed to fetch services");
                self.listings.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        FetchOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn page_url(query: &str) -> Url {
        let mut url = Url::parse("http://localhost:3000/services").unwrap();
        url.set_query(Some(query).filter(|q| !q.is_empty()));
        url
    }

    fn listing(name: &str) -> ServiceListing {
        ServiceListing {
            id: Uuid::new_v4(),
            name: name.into(),
            description: "d".into(),
            category: Category::Other,
            price: 1.0,
            duration_minutes: 30,
            image_url: "https://example.com/x.png".into(),
            is_available: true,
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn seeds_filter_from_url() {
        let state = BrowseState::new(page_url("category=Painting&sort=rating&search=fence"));
        assert_eq!(state.filter().category, Some(Category::Painting));
        assert_eq!(state.filter().sort, SortKey::Rating);
        assert_eq!(state.filter().search, "fence");
        assert!(!state.loading());
        assert_eq!(state.latest_seq(), 0);
    }

    #[test]
    fn live_filters_rewrite_url_and_fetch() {
        let mut state = BrowseState::new(page_url(""));
        let ticket = state.set_category(Some(Category::Plumbing)).expect("fetch");
        assert_eq!(state.url().query(), Some("category=Plumbing"));
        let ticket2 = state.set_sort(SortKey::PriceDesc).expect("fetch");
        assert_eq!(state.url().query(), Some("category=Plumbing&sort=price_desc"));
        assert!(ticket2.seq > ticket.seq);
        assert!(state.loading());

        // Unchanged values do not refetch
        assert!(state.set_sort(SortKey::PriceDesc).is_none());
        assert!(state.set_category(Some(Category::Plumbing)).is_none());

        // Back to "all" drops the parameter
        state.set_category(None).expect("fetch");
        assert_eq!(state.url().query(), Some("sort=price_desc"));
    }

    #[test]
    fn search_edits_do_not_fetch_until_submitted() {
        let mut state = BrowseState::new(page_url(""));
        state.set_search_text("pipe");
        assert_eq!(state.latest_seq(), 0);
        assert_eq!(state.url().query(), None);

        let ticket = state.submit_search();
        assert_eq!(ticket.filter.search, "pipe");
        assert_eq!(state.url().query(), Some("search=pipe"));
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut state = BrowseState::new(page_url(""));
        let first = state.set_category(Some(Category::Cleaning)).expect("fetch");
        let second = state.set_category(Some(Category::Plumbing)).expect("fetch");

        assert_eq!(state.complete(second.seq, Ok(vec![listing("newer")])), FetchOutcome::Applied);
        assert!(!state.loading());
        assert_eq!(state.complete(first.seq, Ok(vec![listing("older")])), FetchOutcome::Stale);
        assert_eq!(state.listings()[0].name, "newer");
    }

    #[test]
    fn loading_tracks_only_the_latest_fetch() {
        let mut state = BrowseState::new(page_url(""));
        let first = state.begin_fetch();
        let _second = state.begin_fetch();
        assert_eq!(state.complete(first.seq, Ok(vec![])), FetchOutcome::Stale);
        assert!(state.loading());
    }

    #[test]
    fn failure_clears_results_and_next_success_clears_error() {
        let mut state = BrowseState::new(page_url(""));
        let t = state.begin_fetch();
        state.complete(t.seq, Ok(vec![listing("a")]));

        let t = state.begin_fetch();
        let err = ClientError::Api { status: 500, message: "Error fetching services".into() };
        assert_eq!(state.complete(t.seq, Err(err)), FetchOutcome::Applied);
        assert!(state.listings().is_empty());
        assert_eq!(state.error(), Some(LOAD_ERROR_MESSAGE));
        assert!(!state.loading());

        let t = state.begin_fetch();
        state.complete(t.seq, Ok(vec![listing("b")]));
        assert_eq!(state.error(), None);
        assert_eq!(state.listings().len(), 1);
    }
}
