//! Index webpages into Marqo via InstantAPI structured extraction.
//!
//! The adapter turns a list of webpage URLs into searchable documents:
//! each page goes through the InstantAPI extraction service with a
//! caller-supplied response structure, the extracted record is stamped
//! with a content-addressed identity, and the batch is submitted to a
//! Marqo index whose modality (text-only or multimodal) matches the
//! fields being indexed.
//!
//! # Example
//!
//! ```rust,ignore
//! use marqo_instantapi::{AddDocumentsParams, InstantApiMarqoAdapter, SearchParams};
//! use serde_json::json;
//!
//! let adapter = InstantApiMarqoAdapter::connect(
//!     InstantApiMarqoAdapter::DEFAULT_MARQO_URL,
//!     None,
//!     &std::env::var("INSTANTAPI_KEY")?,
//! );
//!
//! let params = AddDocumentsParams::new(
//!     "getProductDetails",
//!     json!({"title": "the product title", "image_url": "the main product image"}),
//! )
//! .with_text_fields(["title"])
//! .with_image_fields(["image_url"]);
//!
//! let outcomes = adapter
//!     .add_documents(&["https://example.com/product/1".to_string()], "products", &params)
//!     .await?;
//!
//! let results = adapter.search("coffee mug", "products", &SearchParams::new()).await?;
//! ```

pub mod adapter;
pub mod crawl;
pub mod domain;
pub mod error;
pub mod index;
pub mod mappings;
pub mod pipeline;
pub mod schema;
pub mod search;
pub mod testing;
pub mod traits;
pub mod types;

pub use adapter::InstantApiMarqoAdapter;
pub use domain::root_domain;
pub use error::{AdapterError, Result};
pub use index::IndexDefaults;
pub use mappings::{make_mappings, FieldWeightPlan, COMBINATION_FIELD};
pub use schema::{matches_schema, validate_flat};
pub use search::{SearchMethod, SearchParams, DEFAULT_SEARCH_DEPTH};
pub use traits::{IndexEngine, PageExtractor};
pub use types::{
    document_id, AddDocumentsParams, CrawlParams, IngestOutcome, ID_FIELD, SOURCE_URL_FIELD,
};

pub use instantapi_client;
pub use marqo_client;
