use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    ),
    tag = "meta"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "SkyDrift API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Liveness probe", body = HealthResponse)
    ),
    tag = "meta"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
