use common::catalog::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("sign in required")]
    Unauthenticated,
    #[error("invalid listing: {0}")]
    InvalidDraft(FieldErrors),
    #[error("identity error: {0}")]
    Identity(String),
}
