use async_trait::async_trait;
use common::{
    catalog::{ListingFilter, ListingInput, ServiceListing},
    types::ApiResponse,
};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::errors::ClientError;

/// Default catalog API location when `CATALOG_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Remote catalog operations used by the front end.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<ServiceListing>, ClientError>;
    async fn get_listing(&self, id: &str) -> Result<ServiceListing, ClientError>;
    async fn create_listing(&self, input: &ListingInput) -> Result<ServiceListing, ClientError>;
}

/// [`CatalogApi`] over the REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpCatalogApi {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client: reqwest::Client::new(), base })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        let url = std::env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    pub fn base_url(&self) -> &Url { &self.base }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }
}

/// Unwrap the `{ success, data, message }` envelope.
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    let text = res.text().await?;
    let envelope: Option<ApiResponse<T>> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        let message = envelope
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        return Err(ClientError::Api { status: status.as_u16(), message });
    }

    match envelope {
        Some(ApiResponse { success: true, data: Some(data), .. }) => Ok(data),
        Some(ApiResponse { message, .. }) => Err(ClientError::MalformedResponse(
            message.unwrap_or_else(|| "response carried no data".to_string()),
        )),
        None => Err(ClientError::MalformedResponse(format!("unexpected body from {status}"))),
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<ServiceListing>, ClientError> {
        let mut url = self.endpoint("services")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in [("category", &filter.category), ("sort", &filter.sort), ("search", &filter.search)] {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        debug!(%url, "list services");
        let res = self.client.get(url).send().await?;
        decode(res).await
    }

    async fn get_listing(&self, id: &str) -> Result<ServiceListing, ClientError> {
        let mut url = self.endpoint("services/")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::MalformedResponse("base url cannot hold a path".into()))?
            .pop_if_empty()
            .push(id);
        let res = self.client.get(url).send().await?;
        decode(res).await
    }

    async fn create_listing(&self, input: &ListingInput) -> Result<ServiceListing, ClientError> {
        let url = self.endpoint("services")?;
        let res = self.client.post(url).json(input).send().await?;
        decode(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let api = HttpCatalogApi::new("http://localhost:5000/api").unwrap();
        assert_eq!(api.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(api.endpoint("services").unwrap().as_str(), "http://localhost:5000/api/services");

        let api = HttpCatalogApi::new("http://localhost:5000").unwrap();
        assert_eq!(api.endpoint("services").unwrap().as_str(), "http://localhost:5000/services");
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(HttpCatalogApi::new("not a url"), Err(ClientError::InvalidUrl(_))));
    }
}
