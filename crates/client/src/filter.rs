use common::catalog::{Category, ListingFilter, SortKey};
use url::{form_urlencoded, Url};

/// The (category, sort, search) triple shown in the browse controls.
///
/// Unset dimensions (`category = None`, default sort, blank search) are
/// omitted from the URL query entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<Category>,
    pub sort: SortKey,
    pub search: String,
}

impl FilterState {
    /// Seed from a query string such as `category=Plumbing&sort=price_desc`.
    /// Unknown categories and sort values fall back to their defaults.
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(query.trim_start_matches('?').as_bytes()))
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>) -> Self {
        let mut state = FilterState::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "category" => state.category = value.parse().ok(),
                "sort" => state.sort = SortKey::parse_lenient(Some(value.as_ref())),
                "search" => state.search = value.into_owned(),
                _ => {}
            }
        }
        state
    }

    /// Present parameters in `category`, `sort`, `search` order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(sort) = self.sort.as_param() {
            pairs.push(("sort", sort.to_string()));
        }
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }

    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }

    /// Replace the query of `url` with this state; other parameters are dropped.
    pub fn write_to_url(&self, url: &mut Url) {
        let query = self.to_query();
        url.set_query(if query.is_empty() { None } else { Some(&query) });
    }

    /// Parameters for `GET /services`.
    pub fn to_filter(&self) -> ListingFilter {
        ListingFilter {
            category: self.category.map(|c| c.to_string()),
            sort: self.sort.as_param().map(str::to_string),
            search: Some(self.search.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}
