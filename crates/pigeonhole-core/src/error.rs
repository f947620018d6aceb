//! Error types for Pigeonhole

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Normalized provider failure: the completion API answered with an
    /// error envelope (auth, quota, bad request, ...).
    #[error("Provider error {status} ({code}): {message}")]
    Provider {
        status: u16,
        code: String,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
