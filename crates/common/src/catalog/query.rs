use serde::{Deserialize, Serialize};

use super::{category::Category, listing::ServiceListing, sort::SortKey};

/// Raw `category` / `sort` / `search` parameters as they arrive on the query
/// string. Nothing is validated here; see [`ListingQuery`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    Any,
    Is(Category),
    /// A value outside the category set. Matches no listing.
    Unmatched(String),
}

/// Normalized listing query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: CategoryFilter,
    pub sort: SortKey,
    /// Trimmed, never empty.
    pub search: Option<String>,
}

impl From<&ListingFilter> for ListingQuery {
    fn from(filter: &ListingFilter) -> Self {
        let category = match filter.category.as_deref().map(str::trim) {
            None | Some("") => CategoryFilter::Any,
            Some(raw) if raw.eq_ignore_ascii_case("all") => CategoryFilter::Any,
            Some(raw) => match raw.parse::<Category>() {
                Ok(c) => CategoryFilter::Is(c),
                Err(_) => CategoryFilter::Unmatched(raw.to_string()),
            },
        };
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        ListingQuery { category, sort: SortKey::parse_lenient(filter.sort.as_deref()), search }
    }
}

impl From<ListingFilter> for ListingQuery {
    fn from(filter: ListingFilter) -> Self {
        ListingQuery::from(&filter)
    }
}

impl ListingQuery {
    pub fn matches_nothing(&self) -> bool {
        matches!(self.category, CategoryFilter::Unmatched(_))
    }

    /// Category equality AND case-insensitive substring on name OR description.
    pub fn matches(&self, listing: &ServiceListing) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::Any => true,
            CategoryFilter::Is(c) => listing.category == *c,
            CategoryFilter::Unmatched(_) => false,
        };
        if !category_ok {
            return false;
        }
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                listing.name.to_lowercase().contains(&term) || listing.description.to_lowercase().contains(&term)
            }
        }
    }

    /// Filter then sort an in-memory set.
    pub fn apply(&self, listings: Vec<ServiceListing>) -> Vec<ServiceListing> {
        let mut out: Vec<ServiceListing> = listings.into_iter().filter(|l| self.matches(l)).collect();
        out.sort_by(|a, b| self.sort.compare(a, b));
        out
    }
}
