use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no OpenWeatherMap API key configured")]
    MissingApiKey,
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("weather service returned status {0}")]
    Status(u16),
}
