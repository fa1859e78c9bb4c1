use serde::{Deserialize, Serialize};

use crate::catalog::FieldError;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Response envelope shared by every catalog endpoint.
///
/// Successful responses carry `data` (and `count` for collections); failures
/// carry a human-readable `message`, optionally an `error` detail and the
/// offending `fields` for validation failures.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, count: None, data: Some(data), message: None, error: None, fields: Vec::new() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, count: None, data: None, message: Some(message.into()), error: None, fields: Vec::new() }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldError>) -> Self {
        self.fields = fields;
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Collection response; `count` always equals `data.len()`.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self { count: Some(count), ..Self::ok(data) }
    }
}
