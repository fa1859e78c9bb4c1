//! Shared vocabulary for the catalog: listing records, filter parameters,
//! response envelopes and logging setup. Used by the server, the service
//! layer and the client alike.

pub mod catalog;
pub mod types;
pub mod utils;
