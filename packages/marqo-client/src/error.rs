//! Error types for the Marqo client.

use thiserror::Error;

/// Result type for Marqo client operations.
pub type Result<T> = std::result::Result<T, MarqoError>;

/// Marqo client errors.
#[derive(Debug, Error)]
pub enum MarqoError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error (non-2xx response)
    #[error("Marqo error ({status}): {message}")]
    Api { status: u16, message: String },
}
