use axum::{
    extract::{Path, State},
    Json,
};

use crate::weather::{wind_grid, WeatherData, WindGrid};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/weather/wind/grid",
    responses(
        (status = 200, description = "Global wind field for display", body = WindGrid)
    ),
    tag = "weather"
)]
pub async fn grid() -> Json<WindGrid> {
    Json(wind_grid(&mut rand::thread_rng()))
}

#[utoipa::path(
    get,
    path = "/api/weather/{lat}/{lng}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lng" = f64, Path, description = "Longitude in degrees")
    ),
    responses(
        (status = 200, description = "Current conditions, or null when unavailable", body = Option<WeatherData>)
    ),
    tag = "weather"
)]
pub async fn at_location(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(f64, f64)>,
) -> Json<Option<WeatherData>> {
    Json(state.weather.weather_at(lat, lng).await)
}
