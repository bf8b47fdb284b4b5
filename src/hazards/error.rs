use thiserror::Error;

#[derive(Debug, Error)]
pub enum FireError {
    #[error("NASA_FIRMS_API_KEY not configured")]
    MissingApiKey,
    #[error("invalid NASA FIRMS API key")]
    InvalidApiKey,
    #[error("NASA FIRMS rate limit exceeded")]
    RateLimited,
    #[error("NASA FIRMS returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("NASA FIRMS error: {0}")]
    Upstream(String),
    #[error("FIRMS CSV header lacks latitude/longitude columns")]
    Header,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum StormError {
    #[error("NOAA alerts returned status {0}")]
    Status(u16),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
