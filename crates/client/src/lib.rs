//! Non-visual behavior of the catalog front end: filter state kept in sync
//! with the page URL, race-guarded listing fetches, the listing creation
//! form and the identity capability that gates it.

pub mod api;
pub mod browser;
pub mod draft;
pub mod errors;
pub mod filter;
pub mod identity;
pub mod state;

pub use api::{CatalogApi, HttpCatalogApi};
pub use browser::Browser;
pub use draft::ListingDraft;
pub use errors::ClientError;
pub use filter::FilterState;
pub use identity::{Credentials, Identity, IdentityProvider, LocalIdentityProvider};
pub use state::{BrowseState, FetchOutcome, FetchTicket, LOAD_ERROR_MESSAGE};
