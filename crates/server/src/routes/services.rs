use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use common::{
    catalog::{ListingFilter, ListingInput, ServiceListing},
    types::ApiResponse,
};
use serde::Deserialize;
use tracing::info;

use crate::{errors::ApiError, routes::ServerState};

/// Query string of `GET /services`. Every parameter is optional.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// Category name; absent or `all` means every category
    pub category: Option<String>,
    /// `price_asc`, `price_desc` or `rating`; anything else sorts newest first
    pub sort: Option<String>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
}

impl From<ListingParams> for ListingFilter {
    fn from(p: ListingParams) -> Self {
        ListingFilter { category: p.category, sort: p.sort, search: p.search }
    }
}

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(ListingParams),
    responses(
        (status = 200, description = "Matching listings", body = crate::openapi::ListingListDoc),
        (status = 400, description = "Malformed query string", body = crate::openapi::FailureDoc),
        (status = 500, description = "Error fetching services", body = crate::openapi::FailureDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ServiceListing>>>, ApiError> {
    let Query(params) = params.map_err(ApiError::bad_query)?;
    let filter = ListingFilter::from(params);
    let page = state.catalog.list_listings(&filter).await.map_err(ApiError::listing)?;
    Ok(Json(ApiResponse::list(page.data)))
}

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::ListingInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ListingDoc),
        (status = 400, description = "Error creating service", body = crate::openapi::FailureDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ListingInput>, JsonRejection>,
) -> Result<Json<ApiResponse<ServiceListing>>, ApiError> {
    let Json(input) = payload.map_err(ApiError::bad_body)?;
    let created = state.catalog.create_listing(input).await.map_err(ApiError::creating)?;
    info!(id = %created.id, name = %created.name, "created service listing");
    Ok(Json(ApiResponse::ok(created)))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Listing UUID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ListingDoc),
        (status = 400, description = "Invalid service id", body = crate::openapi::FailureDoc),
        (status = 404, description = "Service not found", body = crate::openapi::FailureDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ServiceListing>>, ApiError> {
    let listing = state.catalog.get_listing(&id).await.map_err(ApiError::fetching)?;
    Ok(Json(ApiResponse::ok(listing)))
}
