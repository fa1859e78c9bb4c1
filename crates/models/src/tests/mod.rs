
/// Listing insert/read tests
pub mod listing_tests;
