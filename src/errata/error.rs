use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErrataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Errata service returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("Authentication failed for {url}, check your credentials")]
    Authentication { url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Body could not be decoded as the expected document
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Transport is shut down")]
    Closed,
}
