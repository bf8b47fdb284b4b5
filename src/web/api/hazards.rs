use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::hazards::storms::Storm;
use crate::hazards::{is_near_fire, storm_at, FireData, StormData};
use crate::web::state::AppState;

const DEFAULT_FIRE_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RadiusQuery {
    /// Search radius in kilometres
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FireCheck {
    pub lat: f64,
    pub lng: f64,
    pub is_over_fire: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StormCheck {
    pub lat: f64,
    pub lng: f64,
    pub in_storm: bool,
    pub storm: Option<Storm>,
}

#[utoipa::path(
    get,
    path = "/api/fires",
    responses(
        (status = 200, description = "Active fire detections", body = FireData)
    ),
    tag = "hazards"
)]
pub async fn fires(State(state): State<AppState>) -> Json<FireData> {
    let data = state.fires.active_fires().await;
    Json(FireData::clone(&data))
}

#[utoipa::path(
    get,
    path = "/api/fires/check/{lat}/{lng}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lng" = f64, Path, description = "Longitude in degrees"),
        RadiusQuery
    ),
    responses(
        (status = 200, description = "Whether a fire lies within the radius", body = FireCheck)
    ),
    tag = "hazards"
)]
pub async fn check_fire(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(f64, f64)>,
    Query(query): Query<RadiusQuery>,
) -> Json<FireCheck> {
    let radius = query.radius_km.unwrap_or(DEFAULT_FIRE_RADIUS_KM);
    let data = state.fires.active_fires().await;
    Json(FireCheck {
        lat,
        lng,
        is_over_fire: is_near_fire(lat, lng, &data.fires, radius),
    })
}

#[utoipa::path(
    get,
    path = "/api/storms",
    responses(
        (status = 200, description = "Active severe weather alerts", body = StormData)
    ),
    tag = "hazards"
)]
pub async fn storms(State(state): State<AppState>) -> Json<StormData> {
    let data = state.storms.active_storms().await;
    Json(StormData::clone(&data))
}

#[utoipa::path(
    get,
    path = "/api/storms/check/{lat}/{lng}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lng" = f64, Path, description = "Longitude in degrees")
    ),
    responses(
        (status = 200, description = "The storm whose alert polygon covers this point, if any", body = StormCheck)
    ),
    tag = "hazards"
)]
pub async fn check_storm(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(f64, f64)>,
) -> Json<StormCheck> {
    let data = state.storms.active_storms().await;
    let storm = storm_at(lat, lng, &data.storms).cloned();
    Json(StormCheck {
        lat,
        lng,
        in_storm: storm.is_some(),
        storm,
    })
}
