//! Create-listing form. Raw strings in, typed [`ListingInput`] out.

use common::catalog::{Category, FieldErrors, ListingInput};
use url::Url;

#[derive(Clone, Debug, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub duration: String,
    pub image_url: String,
    pub is_available: bool,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            price: String::new(),
            duration: String::new(),
            image_url: String::new(),
            is_available: true,
        }
    }
}

fn required<'a>(errors: &mut FieldErrors, field: &str, value: &'a str, message: &str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, message);
        None
    } else {
        Some(value)
    }
}

impl ListingDraft {
    /// Check every field, reporting all failures at once.
    pub fn validate(&self) -> Result<ListingInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required(&mut errors, "name", &self.name, "Name is required");
        let description = required(&mut errors, "description", &self.description, "Description is required");

        let category = required(&mut errors, "category", &self.category, "Category is required").and_then(|raw| {
            match raw.parse::<Category>() {
                Ok(c) => Some(c),
                Err(e) => {
                    errors.push("category", e.to_string());
                    None
                }
            }
        });

        let price = required(&mut errors, "price", &self.price, "Price is required").and_then(|raw| {
            match raw.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
                _ => {
                    errors.push("price", "Price must be a valid positive number");
                    None
                }
            }
        });

        let duration = required(&mut errors, "duration", &self.duration, "Duration is required").and_then(|raw| {
            match raw.parse::<i32>() {
                Ok(d) if d >= 0 => Some(i64::from(d)),
                _ => {
                    errors.push("duration", "Duration must be a valid positive number");
                    None
                }
            }
        });

        let image_url = required(&mut errors, "imageUrl", &self.image_url, "Image URL is required").and_then(|raw| {
            match Url::parse(raw) {
                Ok(_) => Some(raw.to_string()),
                Err(_) => {
                    errors.push("imageUrl", "Please enter a valid URL");
                    None
                }
            }
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ListingInput {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            category: category.map(|c| c.to_string()),
            price,
            duration_minutes: duration,
            image_url,
            is_available: Some(self.is_available),
            rating: None,
            review_count: None,
        })
    }
}
