use std::sync::Arc;

use thiserror::Error;

use crate::hazards::{FireClient, FireError, StormClient, StormError};
use crate::location::{LocationError, LocationResolver};
use crate::telemetry::{TelemetryError, WindborneClient};
use crate::weather::{WeatherClient, WeatherError};

use super::config::{Config, ConfigError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry client: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("weather client: {0}")]
    Weather(#[from] WeatherError),
    #[error("fire client: {0}")]
    Fires(#[from] FireError),
    #[error("storm client: {0}")]
    Storms(#[from] StormError),
    #[error("location resolver: {0}")]
    Location(#[from] LocationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telemetry: Arc<WindborneClient>,
    pub weather: Arc<WeatherClient>,
    pub fires: Arc<FireClient>,
    pub storms: Arc<StormClient>,
    pub location: Arc<LocationResolver>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StartupError> {
        config.validate()?;
        Ok(AppState {
            telemetry: Arc::new(WindborneClient::new(&config.telemetry)?),
            weather: Arc::new(WeatherClient::new(&config.weather)?),
            fires: Arc::new(FireClient::new(&config.fires)?),
            storms: Arc::new(StormClient::new(&config.storms)?),
            location: Arc::new(LocationResolver::new(&config.location)?),
            config: Arc::new(config),
        })
    }
}
