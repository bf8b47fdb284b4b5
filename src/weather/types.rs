use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherData {
    /// Degrees Celsius
    pub temperature: f64,
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    pub description: String,
    /// m/s
    pub wind_speed: f64,
    /// Degrees, direction the wind blows from
    pub wind_direction: f64,
    /// Cloud cover percentage
    pub clouds: f64,
    pub region: String,
}

/// Wind observation at a point. `direction` is where the wind blows *from*,
/// clockwise from true north; `speed` is in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WindSample {
    pub lat: f64,
    pub lng: f64,
    pub speed: f64,
    pub direction: f64,
}

impl WindSample {
    pub fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.direction.is_finite()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WindGrid {
    pub winds: Vec<WindSample>,
    /// Unix seconds
    pub timestamp: i64,
}
