use std::cmp::Ordering;

use super::listing::ServiceListing;

/// Ordering applied to a listing query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// `createdAt` descending.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    /// `rating` descending.
    Rating,
}

impl SortKey {
    /// Every key, default first.
    pub const ALL: [SortKey; 4] = [SortKey::Newest, SortKey::PriceAsc, SortKey::PriceDesc, SortKey::Rating];

    /// Parse a query-string value. Absent, empty and unrecognized values all
    /// map to [`SortKey::Newest`]; this never fails.
    pub fn parse_lenient(raw: Option<&str>) -> SortKey {
        match raw.map(str::trim) {
            Some("price_asc") => SortKey::PriceAsc,
            Some("price_desc") => SortKey::PriceDesc,
            Some("rating") => SortKey::Rating,
            _ => SortKey::Newest,
        }
    }

    /// Query-string value, `None` for the default ordering so it can be
    /// omitted from URLs.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortKey::Newest => None,
            SortKey::PriceAsc => Some("price_asc"),
            SortKey::PriceDesc => Some("price_desc"),
            SortKey::Rating => Some("rating"),
        }
    }

    /// Total order over listings for this key. Ties on the key are broken by
    /// ascending `id`, matching the store ordering.
    pub fn compare(self, a: &ServiceListing, b: &ServiceListing) -> Ordering {
        let primary = match self {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}
