use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{catalog::FieldError, types::ApiResponse};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Failure envelope `{success:false, message, error?, fields?}` with a status.
///
/// `cause` is only logged. Store errors never reach the response body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
    pub error: Option<String>,
    pub fields: Vec<FieldError>,
    cause: Option<String>,
    code: Option<u16>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message, error: None, fields: Vec::new(), cause: None, code: None }
    }

    fn internal(message: &'static str, cause: &ServiceError) -> Self {
        Self { cause: Some(cause.to_string()), code: Some(cause.code()), ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, message) }
    }

    /// `POST /services` failures.
    pub fn creating(e: ServiceError) -> Self {
        const MESSAGE: &str = "Error creating service";
        match e {
            ServiceError::Validation(errors) => Self {
                error: Some(errors.to_string()),
                fields: errors.into_inner(),
                ..Self::new(StatusCode::BAD_REQUEST, MESSAGE)
            },
            other => Self::internal(MESSAGE, &other),
        }
    }

    /// Body that is not valid JSON for a listing.
    pub fn bad_body(rejection: JsonRejection) -> Self {
        Self { error: Some(rejection.body_text()), ..Self::new(StatusCode::BAD_REQUEST, "Error creating service") }
    }

    /// Query string that does not fit the listing filter, e.g. a repeated key.
    pub fn bad_query(rejection: QueryRejection) -> Self {
        Self { error: Some(rejection.body_text()), ..Self::new(StatusCode::BAD_REQUEST, "Error fetching services") }
    }

    /// `GET /services` failures.
    pub fn listing(e: ServiceError) -> Self {
        Self::internal("Error fetching services", &e)
    }

    /// `GET /services/:id` failures.
    pub fn fetching(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Service not found"),
            ServiceError::InvalidId(_) => Self::new(StatusCode::BAD_REQUEST, "Invalid service id"),
            other => Self::internal("Error fetching service", &other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, cause = self.cause.as_deref().unwrap_or(""), "{}", self.message);
        } else {
            warn!(status = %self.status, error = self.error.as_deref().unwrap_or(""), "{}", self.message);
        }
        let mut body = ApiResponse::<()>::failure(self.message).with_fields(self.fields);
        if let Some(detail) = self.error {
            body = body.with_error(detail);
        }
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
