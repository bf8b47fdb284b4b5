mod forecast;
mod predictor;
mod velocity;
mod wind;

pub use forecast::{attach_forecasts, forecast_track, NoWind, WindSource};
pub use predictor::{DEFAULT_HOURS_AHEAD, MAX_HOURS_AHEAD};
