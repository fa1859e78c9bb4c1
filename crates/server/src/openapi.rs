use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Listing creation body. `duration` is accepted as an alias of `durationMinutes`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ListingInputDoc {
    pub name: String,
    pub description: String,
    #[schema(example = "Cleaning")]
    pub category: String,
    pub price: f64,
    pub duration_minutes: i32,
    pub image_url: String,
    pub is_available: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceListingDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub duration_minutes: i32,
    pub image_url: String,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i32,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct ListingDoc { pub success: bool, pub data: ServiceListingDoc }

#[derive(ToSchema)]
pub struct ListingListDoc { pub success: bool, pub count: usize, pub data: Vec<ServiceListingDoc> }

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct FailureDoc {
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
    ),
    components(
        schemas(
            HealthResponse,
            ListingInputDoc,
            ServiceListingDoc,
            ListingDoc,
            ListingListDoc,
            FieldErrorDoc,
            FailureDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "services")
    )
)]
pub struct ApiDoc;
