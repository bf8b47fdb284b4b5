use axum::{extract::State, Json};

use crate::location::{LocationRequest, LocationResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/location/parse",
    request_body = LocationRequest,
    responses(
        (status = 200, description = "Resolved coordinates, or success=false with a reason", body = LocationResponse)
    ),
    tag = "location"
)]
pub async fn parse(
    State(state): State<AppState>,
    Json(request): Json<LocationRequest>,
) -> Json<LocationResponse> {
    let query = request.query.trim();
    if query.is_empty() {
        return Json(LocationResponse::failure("Query is empty"));
    }
    Json(state.location.resolve(query).await)
}
