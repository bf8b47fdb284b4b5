use utoipa::OpenApi;

use super::api::balloons::PredictionResponse;
use super::api::error::ErrorResponse;
use super::api::hazards::{FireCheck, StormCheck};
use super::api::meta::{HealthResponse, RootResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::meta::root,
        super::api::meta::health,
        super::api::balloons::selected,
        super::api::balloons::all_current,
        super::api::balloons::predictions,
        super::api::weather::grid,
        super::api::weather::at_location,
        super::api::hazards::fires,
        super::api::hazards::check_fire,
        super::api::hazards::storms,
        super::api::hazards::check_storm,
        super::api::location::parse,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            ErrorResponse,
            PredictionResponse,
            FireCheck,
            StormCheck,
            crate::telemetry::Position,
            crate::telemetry::BalloonTrack,
            crate::telemetry::SelectedBalloons,
            crate::weather::WeatherData,
            crate::weather::WindSample,
            crate::weather::WindGrid,
            crate::hazards::fires::Fire,
            crate::hazards::FireData,
            crate::hazards::storms::Storm,
            crate::hazards::StormData,
            crate::location::LocationRequest,
            crate::location::LocationResponse,
        )
    ),
    info(
        title = "SkyDrift API",
        description = "Balloon constellation tracking with trajectory forecasts and hazard overlays",
        version = "0.1.0"
    ),
    tags(
        (name = "meta", description = "Service status"),
        (name = "balloons", description = "Constellation positions and forecasts"),
        (name = "weather", description = "Weather conditions and wind field"),
        (name = "hazards", description = "Wildfires and severe weather alerts"),
        (name = "location", description = "Free-text place lookup")
    )
)]
pub struct ApiDoc;
