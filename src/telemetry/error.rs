use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("hour {hour:02} returned status {status}")]
    Status { hour: u8, status: u16 },
    #[error("hour {hour:02} is not a JSON array")]
    NotAnArray { hour: u8 },
}
