use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::predict::{attach_forecasts, forecast_track, MAX_HOURS_AHEAD};
use crate::telemetry::track::{build_track, color_for, current_positions, selected_balloons};
use crate::telemetry::{Position, SelectedBalloons};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SelectedQuery {
    /// Number of balloons to select (1 to 100)
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PredictionQuery {
    /// Comma-separated forecast horizons in hours (1 to 240), e.g. `5,10`
    pub hours: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub balloon_id: usize,
    pub predictions: Vec<Position>,
}

/// Any value outside 1..=MAX_HOURS_AHEAD discards the whole list.
fn parse_hours(raw: Option<&str>, default: &[u32]) -> Vec<u32> {
    let Some(raw) = raw else {
        return default.to_vec();
    };
    let parsed: Option<Vec<u32>> = raw
        .split(',')
        .map(|h| {
            h.trim()
                .parse::<u32>()
                .ok()
                .filter(|h| (1..=MAX_HOURS_AHEAD).contains(h))
        })
        .collect();
    parsed.unwrap_or_else(|| default.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/balloons/selected",
    params(SelectedQuery),
    responses(
        (status = 200, description = "Representative balloons with forecasts", body = SelectedBalloons),
        (status = 400, description = "Count out of range", body = ErrorResponse)
    ),
    tag = "balloons"
)]
pub async fn selected(
    State(state): State<AppState>,
    Query(query): Query<SelectedQuery>,
) -> ApiResult<Json<SelectedBalloons>> {
    let prediction = &state.config.prediction;
    let count = query.count.unwrap_or(prediction.default_count);
    if count == 0 || count > prediction.max_count {
        return Err(ApiError::Validation(format!(
            "count must be between 1 and {}",
            prediction.max_count
        )));
    }

    let snapshot = state.telemetry.snapshot().await;
    let mut selection = selected_balloons(&snapshot, count);
    attach_forecasts(
        &mut selection.balloons,
        state.weather.as_ref(),
        &prediction.hours_ahead,
    )
    .await;

    Ok(Json(selection))
}

#[utoipa::path(
    get,
    path = "/api/balloons/all/current",
    responses(
        (status = 200, description = "Every valid current position", body = Vec<Position>)
    ),
    tag = "balloons"
)]
pub async fn all_current(State(state): State<AppState>) -> Json<Vec<Position>> {
    let snapshot = state.telemetry.snapshot().await;
    Json(current_positions(&snapshot))
}

#[utoipa::path(
    get,
    path = "/api/balloons/predictions/{id}",
    params(
        ("id" = usize, Path, description = "Balloon index in the constellation feed"),
        PredictionQuery
    ),
    responses(
        (status = 200, description = "Forecast positions", body = PredictionResponse),
        (status = 404, description = "No current position for this balloon", body = ErrorResponse)
    ),
    tag = "balloons"
)]
pub async fn predictions(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Query(query): Query<PredictionQuery>,
) -> ApiResult<Json<PredictionResponse>> {
    let hours = parse_hours(query.hours.as_deref(), &state.config.prediction.hours_ahead);

    let snapshot = state.telemetry.snapshot().await;
    let track = build_track(&snapshot, id, color_for(id))
        .ok_or(ApiError::NotFound("balloon_not_found"))?;
    let predictions = forecast_track(&track, state.weather.as_ref(), &hours).await;

    Ok(Json(PredictionResponse {
        balloon_id: id,
        predictions,
    }))
}
