//! Error handling for restcall

use thiserror::Error;

/// Main error type for restcall operations
///
/// Errors raised by the transport or by the JSON decoder are passed through
/// as-is; nothing is retried or reclassified.
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for restcall operations
pub type Result<T> = std::result::Result<T, RestError>;
