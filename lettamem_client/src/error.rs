use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Letta API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response from Letta API: {0}")]
    InvalidResponse(String),

    #[error("No API key configured")]
    MissingApiKey,
}
