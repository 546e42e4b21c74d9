//! Core types for ingestion and crawling.

use serde_json::Value;
use sha2::{Digest, Sha256};

use marqo_client::ItemResult;

/// Document field holding the content-addressed identifier.
pub const ID_FIELD: &str = "_id";

/// Document field holding the original page URL, kept retrievable so
/// search hits can link back to their source.
pub const SOURCE_URL_FIELD: &str = "_source_webpage_url";

/// Content-addressed document identifier for a page URL.
///
/// A pure function of the URL, so re-ingesting the same page overwrites
/// the existing document instead of duplicating it.
pub fn document_id(webpage_url: &str) -> String {
    hex::encode(Sha256::digest(webpage_url.as_bytes()))
}

/// Per-document result of an ingestion call.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// The page never reached the index: the extraction call failed, or
    /// the extracted record did not match the requested structure.
    Failed {
        webpage_url: String,
        /// Raw extraction response, `Null` when the call itself failed.
        raw_response: Value,
        reason: String,
    },

    /// The document was submitted; `item` is the engine's per-document
    /// result for it.
    Indexed {
        document_id: String,
        item: ItemResult,
    },
}

impl IngestOutcome {
    /// Whether this outcome represents a page that was never indexed.
    pub fn is_failure(&self) -> bool {
        matches!(self, IngestOutcome::Failed { .. })
    }

    /// Document identifier for indexed outcomes.
    pub fn document_id(&self) -> Option<&str> {
        match self {
            IngestOutcome::Indexed { document_id, .. } => Some(document_id),
            IngestOutcome::Failed { .. } => None,
        }
    }
}

/// Parameters for an add-documents call.
///
/// # Example
///
/// ```rust,ignore
/// let params = AddDocumentsParams::new(
///     "getProductListingDetails",
///     serde_json::json!({
///         "title": "<the name of the product (string)>",
///         "image_url": "<the url of the product image (string)>",
///     }),
/// )
/// .with_text_fields(["title"])
/// .with_image_fields(["image_url"]);
/// ```
#[derive(Debug, Clone)]
pub struct AddDocumentsParams {
    /// Extraction method name forwarded to the extraction service.
    pub api_method_name: String,

    /// Desired response structure; must be flat for indexing.
    pub api_response_structure: Value,

    /// Fields embedded as text.
    pub text_fields: Vec<String>,

    /// Fields whose URL values are embedded as images.
    pub image_fields: Vec<String>,

    /// Documents per transport-level chunk when submitting to the engine.
    pub client_batch_size: usize,

    /// Weight budget shared by all text fields in a combined plan.
    pub total_text_weight: f64,

    /// Weight budget shared by all image fields in a combined plan.
    pub total_image_weight: f64,

    /// Drop records whose shape does not match the requested structure.
    pub enforce_schema: bool,
}

impl AddDocumentsParams {
    /// Create params with defaults: batch size 8, equal modality weights,
    /// schema enforcement on.
    pub fn new(api_method_name: impl Into<String>, api_response_structure: Value) -> Self {
        Self {
            api_method_name: api_method_name.into(),
            api_response_structure,
            text_fields: Vec::new(),
            image_fields: Vec::new(),
            client_batch_size: 8,
            total_text_weight: 0.5,
            total_image_weight: 0.5,
            enforce_schema: true,
        }
    }

    /// Set the text fields to index.
    pub fn with_text_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.text_fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Set the image fields to index.
    pub fn with_image_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.image_fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Set the transport-level chunk size.
    pub fn with_client_batch_size(mut self, size: usize) -> Self {
        self.client_batch_size = size;
        self
    }

    /// Set the modality weight budgets.
    pub fn with_weights(mut self, total_text_weight: f64, total_image_weight: f64) -> Self {
        self.total_text_weight = total_text_weight;
        self.total_image_weight = total_image_weight;
        self
    }

    /// Index records even when their shape does not match the schema.
    pub fn without_schema_enforcement(mut self) -> Self {
        self.enforce_schema = false;
        self
    }

    /// Whether any image fields are being indexed.
    pub fn wants_images(&self) -> bool {
        !self.image_fields.is_empty()
    }
}

/// Parameters for a crawl.
#[derive(Debug, Clone)]
pub struct CrawlParams {
    /// Per-page ingestion parameters.
    pub ingest: AddDocumentsParams,

    /// Root domains checked against each dequeued URL. A URL whose root
    /// domain appears here is SKIPPED — see the crawl module docs for why
    /// this inverted behavior is preserved.
    pub allowed_domains: Vec<String>,

    /// Stop after this many loop iterations; `None` runs until the
    /// frontier drains.
    pub max_pages: Option<usize>,
}

impl CrawlParams {
    /// Create crawl params around ingestion params.
    pub fn new(ingest: AddDocumentsParams) -> Self {
        Self {
            ingest,
            allowed_domains: Vec::new(),
            max_pages: None,
        }
    }

    /// Set the domain filter list.
    pub fn with_allowed_domains(
        mut self,
        domains: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_domains = domains.into_iter().map(|d| d.into()).collect();
        self
    }

    /// Cap the number of crawl iterations.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}
