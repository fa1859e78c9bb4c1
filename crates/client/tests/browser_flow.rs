use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use client::{
    Browser, CatalogApi, ClientError, Credentials, FetchOutcome, HttpCatalogApi, IdentityProvider, ListingDraft,
    LocalIdentityProvider, LOAD_ERROR_MESSAGE,
};
use common::catalog::{Category, ListingFilter, ListingInput, ServiceListing, SortKey};
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

type Reply = Result<Vec<ServiceListing>, ClientError>;

/// Answers `list_listings` calls in order from queued channels, so a test
/// decides when (and in which order) each response arrives.
#[derive(Default)]
struct ScriptedApi {
    replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    seen: Mutex<Vec<ListingFilter>>,
    calls: AtomicUsize,
}

impl ScriptedApi {
    fn deferred(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(rx);
        tx
    }

    fn ready(&self, reply: Reply) {
        let _ = self.deferred().send(reply);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for ScriptedApi {
    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<ServiceListing>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(filter.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(ClientError::MalformedResponse("reply dropped".into()))),
            None => Ok(Vec::new()),
        }
    }

    async fn get_listing(&self, _id: &str) -> Result<ServiceListing, ClientError> {
        Err(ClientError::Api { status: 404, message: "Service not found".into() })
    }

    async fn create_listing(&self, _input: &ListingInput) -> Result<ServiceListing, ClientError> {
        Err(ClientError::Api { status: 500, message: "Error creating service".into() })
    }
}

fn listing(name: &str, category: Category) -> ServiceListing {
    ServiceListing {
        id: Uuid::new_v4(),
        name: name.into(),
        description: format!("{name} description"),
        category,
        price: 10.0,
        duration_minutes: 60,
        image_url: "https://example.com/a.jpg".into(),
        is_available: true,
        rating: 4.0,
        review_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn page(query: &str) -> Url {
    let mut url = Url::parse("http://localhost:3000/services").unwrap();
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    url
}

#[tokio::test]
async fn initial_load_fetches_once_with_url_filter() {
    let api = Arc::new(ScriptedApi::default());
    let browser = Browser::new(api.clone(), page("category=Plumbing&sort=price_desc"));

    assert_eq!(browser.load().await, FetchOutcome::Applied);
    assert_eq!(api.calls(), 1);
    let seen = api.seen.lock().unwrap().clone();
    assert_eq!(seen[0].category.as_deref(), Some("Plumbing"));
    assert_eq!(seen[0].sort.as_deref(), Some("price_desc"));
    assert_eq!(seen[0].search, None);
    assert!(!browser.snapshot().await.loading());
}

#[tokio::test]
async fn search_edits_wait_for_submit() {
    let api = Arc::new(ScriptedApi::default());
    let browser = Browser::new(api.clone(), page(""));
    browser.load().await;

    browser.edit_search("pi").await;
    browser.edit_search("pipe").await;
    assert_eq!(api.calls(), 1);
    assert_eq!(browser.snapshot().await.url().query(), None);

    browser.submit_search().await;
    assert_eq!(api.calls(), 2);
    assert_eq!(api.seen.lock().unwrap()[1].search.as_deref(), Some("pipe"));
    assert_eq!(browser.snapshot().await.url().query(), Some("search=pipe"));

    // Re-selecting the current sort is not a change
    assert!(browser.select_sort(SortKey::Newest).await.is_none());
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_one() {
    let api = Arc::new(ScriptedApi::default());
    let older = api.deferred();
    let newer = api.deferred();
    let browser = Browser::new(api.clone(), page(""));

    let driver = async {
        while api.calls() < 2 {
            tokio::task::yield_now().await;
        }
        let _ = newer.send(Ok(vec![listing("Pipe Fix", Category::Plumbing)]));
        while browser.snapshot().await.loading() {
            tokio::task::yield_now().await;
        }
        let _ = older.send(Ok(vec![listing("Deep Clean", Category::Cleaning)]));
    };

    let (first, second, ()) = tokio::join!(
        browser.select_category(Some(Category::Cleaning)),
        browser.select_category(Some(Category::Plumbing)),
        driver,
    );
    assert_eq!(first, Some(FetchOutcome::Stale));
    assert_eq!(second, Some(FetchOutcome::Applied));

    let state = browser.snapshot().await;
    let names: Vec<&str> = state.listings().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Pipe Fix"]);
    assert_eq!(state.url().query(), Some("category=Plumbing"));
    assert!(!state.loading());
}

#[tokio::test]
async fn failure_clears_results_until_next_success() {
    let api = Arc::new(ScriptedApi::default());
    api.ready(Ok(vec![listing("Deep Clean", Category::Cleaning)]));
    api.ready(Err(ClientError::Api { status: 500, message: "Error fetching services".into() }));
    api.ready(Ok(vec![listing("Pipe Fix", Category::Plumbing)]));
    let browser = Browser::new(api.clone(), page(""));

    browser.load().await;
    assert_eq!(browser.snapshot().await.listings().len(), 1);

    browser.select_sort(SortKey::Rating).await;
    let state = browser.snapshot().await;
    assert!(state.listings().is_empty());
    assert_eq!(state.error(), Some(LOAD_ERROR_MESSAGE));

    browser.select_sort(SortKey::PriceAsc).await;
    let state = browser.snapshot().await;
    assert_eq!(state.error(), None);
    assert_eq!(state.listings()[0].name, "Pipe Fix");
}

#[tokio::test]
async fn create_requires_identity_and_valid_draft() {
    let api = Arc::new(ScriptedApi::default());
    let browser = Browser::new(api.clone(), page(""));
    let result = browser.create_listing(&ListingDraft::default()).await;
    assert!(matches!(result, Err(ClientError::Unauthenticated)));

    let provider = Arc::new(LocalIdentityProvider::new());
    let browser = browser.with_identity(provider.clone());
    assert!(matches!(browser.create_listing(&ListingDraft::default()).await, Err(ClientError::Unauthenticated)));

    let creds = Credentials::new("pro@example.com", "secret1");
    provider.register(&creds, None).await.unwrap();
    provider.authenticate(&creds).await.unwrap();
    match browser.create_listing(&ListingDraft::default()).await {
        Err(ClientError::InvalidDraft(errors)) => assert!(errors.contains("name")),
        other => panic!("expected draft errors, got {other:?}"),
    }
}

async fn spawn_server() -> anyhow::Result<String> {
    let db = models::db::connect_sqlite_memory().await?;
    models::db::migrate(&db).await?;
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    let app = server::build_app(db);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });
    Ok(format!("http://{addr}/api"))
}

fn draft(name: &str, category: &str, price: &str) -> ListingDraft {
    ListingDraft {
        name: name.into(),
        description: format!("{name} by a local pro"),
        category: category.into(),
        price: price.into(),
        duration: "60".into(),
        image_url: "https://example.com/img.jpg".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn http_round_trip_against_catalog_server() -> anyhow::Result<()> {
    let api = Arc::new(HttpCatalogApi::new(&spawn_server().await?)?);
    let provider = Arc::new(LocalIdentityProvider::new());
    let creds = Credentials::new("pro@example.com", "secret1");
    provider.register(&creds, Some("Pro".into())).await?;
    provider.authenticate(&creds).await?;

    let browser = Browser::new(api.clone(), page("category=Cleaning&sort=price_asc")).with_identity(provider);
    let a = browser.create_listing(&draft("Deep Clean", "Cleaning", "10")).await?;
    browser.create_listing(&draft("Pipe Fix", "Plumbing", "25")).await?;
    browser.create_listing(&draft("clean Gutter", "Cleaning", "15")).await?;

    assert_eq!(browser.load().await, FetchOutcome::Applied);
    let state = browser.snapshot().await;
    let names: Vec<&str> = state.listings().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Deep Clean", "clean Gutter"]);

    browser.edit_search("pipe").await;
    browser.select_category(None).await;
    browser.submit_search().await;
    let state = browser.snapshot().await;
    assert_eq!(state.url().query(), Some("sort=price_asc&search=pipe"));
    assert_eq!(state.listings().len(), 1);
    assert_eq!(state.listings()[0].name, "Pipe Fix");

    assert_eq!(browser.get_listing(&a.id.to_string()).await?.name, "Deep Clean");
    match browser.get_listing(&Uuid::new_v4().to_string()).await {
        Err(ClientError::Api { status: 404, message }) => assert_eq!(message, "Service not found"),
        other => panic!("expected 404, got {other:?}"),
    }
    Ok(())
}
