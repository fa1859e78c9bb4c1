pub mod errors;
pub mod db;
pub mod service_listing;

#[cfg(test)]
mod tests;
