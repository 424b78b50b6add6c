use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection failures and deadline expiry both land here.
    #[error("Failed to reach the quote API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The quote API answered with status {0}")]
    Status(StatusCode),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("The API response has no quotation for {0}")]
    KeyNotFound(String),
}

impl ApiError {
    /// True when the request was cut short by its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }
}
