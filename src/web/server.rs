use axum::http::HeaderValue;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::{balloons, hazards, location, meta, weather};
use super::api_doc::ApiDoc;
use super::config::{Config, WebConfig};
use super::state::{AppState, StartupError};

fn cors_layer(web: &WebConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if web.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = web
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.web);

    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        // Balloons
        .route("/api/balloons/selected", get(balloons::selected))
        .route("/api/balloons/all/current", get(balloons::all_current))
        .route("/api/balloons/predictions/{id}", get(balloons::predictions))
        // Weather; the static segment wins over the {lat}/{lng} capture
        .route("/api/weather/wind/grid", get(weather::grid))
        .route("/api/weather/{lat}/{lng}", get(weather::at_location))
        // Hazards
        .route("/api/fires", get(hazards::fires))
        .route("/api/fires/check/{lat}/{lng}", get(hazards::check_fire))
        .route("/api/storms", get(hazards::storms))
        .route("/api/storms/check/{lat}/{lng}", get(hazards::check_storm))
        // Location
        .route("/api/location/parse", post(location::parse))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), StartupError> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::new(config)?;
    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
