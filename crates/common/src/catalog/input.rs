use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::category::Category;

/// Listing creation payload as received from a caller.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure on that field instead of a parse error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingInput {
    #[validate(required(message = "name is required"), custom(function = "not_blank"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(required(message = "description is required"), custom(function = "not_blank"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(required(message = "category is required"), custom(function = "known_category"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[validate(
        required(message = "price is required"),
        range(min = 0.0, message = "price must be a non-negative number")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[validate(
        required(message = "duration is required"),
        range(min = 0, max = 2147483647, message = "duration must be a non-negative number of minutes")
    )]
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,

    #[validate(required(message = "image URL is required"), url(message = "image URL must be a valid URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,

    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[validate(range(min = 0, max = 2147483647, message = "review count must be non-negative"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Category>()
        .map(|_| ())
        .map_err(|e| ValidationError::new("category").with_message(Cow::Owned(e.to_string())))
}

/// Fully validated listing ready to be persisted. Store-assigned fields
/// (`id`, timestamps) are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub duration_minutes: i32,
    pub image_url: String,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i32,
}

impl ListingInput {
    /// Validate every field and convert into a [`NewListing`].
    ///
    /// Defaults: `isAvailable = true`, `rating = 0`, `reviewCount = 0`.
    /// The name is trimmed.
    pub fn validated(self) -> Result<NewListing, FieldErrors> {
        self.validate()?;
        let category = self.category.as_deref().map(str::parse::<Category>);
        match (self.name, self.description, category, self.price, self.duration_minutes, self.image_url) {
            (Some(name), Some(description), Some(Ok(category)), Some(price), Some(duration), Some(image_url)) => {
                Ok(NewListing {
                    name: name.trim().to_string(),
                    description,
                    category,
                    price,
                    duration_minutes: i32::try_from(duration).unwrap_or(i32::MAX),
                    image_url,
                    is_available: self.is_available.unwrap_or(true),
                    rating: self.rating.unwrap_or(0.0),
                    review_count: self.review_count.and_then(|n| i32::try_from(n).ok()).unwrap_or(0),
                })
            }
            _ => Err(FieldErrors::single("listing", "incomplete listing")),
        }
    }
}

/// One rejected field with a readable reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level validation failures, sorted by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        Self(vec![FieldError { field: field.to_string(), message: message.to_string() }])
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = camel_case(&field);
                errs.iter()
                    .map(|e| FieldError {
                        field: field.clone(),
                        message: e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        out.sort_by(|a, b| a.field.cmp(&b.field));
        FieldErrors(out)
    }
}

/// `duration_minutes` -> `durationMinutes`, matching the wire names.
fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
