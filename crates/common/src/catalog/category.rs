use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of service categories a listing may belong to.
///
/// With the `sea-orm` feature the enum maps onto a text column holding the
/// variant name, so the database never sees a value outside this set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sea-orm", derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "sea-orm", sea_orm(rs_type = "String", db_type = "Text"))]
pub enum Category {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Cleaning"))]
    Cleaning,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Plumbing"))]
    Plumbing,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Electrical"))]
    Electrical,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Carpentry"))]
    Carpentry,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Painting"))]
    Painting,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Gardening"))]
    Gardening,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Other"))]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cleaning,
        Category::Plumbing,
        Category::Electrical,
        Category::Carpentry,
        Category::Painting,
        Category::Gardening,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cleaning => "Cleaning",
            Category::Plumbing => "Plumbing",
            Category::Electrical => "Electrical",
            Category::Carpentry => "Carpentry",
            Category::Painting => "Painting",
            Category::Gardening => "Gardening",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the variant name.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
