use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("no OpenAI API key configured")]
    MissingApiKey,
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("model endpoint returned status {0}")]
    Status(u16),
    #[error("empty response from model")]
    EmptyReply,
}
