//! Typed errors for the adapter.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Configuration mistakes (missing fields, non-flat schemas, modality
//! mismatches, bad search methods) abort the whole call. Per-document
//! extraction and validation failures never surface here; they are
//! recorded as [`crate::IngestOutcome::Failed`] entries instead. Engine
//! errors pass through transparently and are never retried.

use thiserror::Error;

/// Errors that can occur during adapter operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Neither text nor image fields were given for indexing
    #[error("no fields specified: at least one text or image field is required")]
    NoFieldsSpecified,

    /// Schema has a non-string value and cannot be indexed
    #[error("schema is not flat: value of '{field}' must be a string description")]
    NonFlatSchema { field: String },

    /// Index modality disagrees with the fields being indexed
    #[error(
        "index '{index_name}' has treat-URLs-as-images set to {index_multimodal}, \
         which conflicts with the requested fields"
    )]
    ModalityMismatch {
        index_name: String,
        /// Whether the existing index treats URL-valued fields as images.
        index_multimodal: bool,
    },

    /// Unknown search method name
    #[error("invalid search method '{0}': expected tensor, lexical or hybrid")]
    InvalidSearchMethod(String),

    /// Destructive operation attempted without confirmation
    #[error("refusing to delete index '{index_name}' without confirm")]
    DeleteNotConfirmed { index_name: String },

    /// Extraction service failed at a point where failure is fatal
    #[error("extraction service error: {0}")]
    Extraction(#[from] instantapi_client::InstantApiError),

    /// Index engine failed; passed through as-is
    #[error(transparent)]
    Marqo(#[from] marqo_client::MarqoError),
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
