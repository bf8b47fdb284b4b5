mod client;
mod error;
mod grid;
mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use grid::wind_grid;
pub use types::{WeatherData, WindGrid, WindSample};
