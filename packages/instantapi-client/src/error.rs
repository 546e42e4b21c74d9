//! Error types for the InstantAPI client.

use thiserror::Error;

/// Result type for InstantAPI client operations.
pub type Result<T> = std::result::Result<T, InstantApiError>;

/// InstantAPI client errors.
#[derive(Debug, Error)]
pub enum InstantApiError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("InstantAPI error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Unexpected response format
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}
