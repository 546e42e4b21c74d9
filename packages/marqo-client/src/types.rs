//! Request and response types for the Marqo REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings for an index, used both when creating an index and when
/// reading back an existing index's configuration.
///
/// Only the settings the adapter cares about are typed; anything else the
/// engine returns is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    /// Embedding model name (e.g. `hf/e5-base-v2`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether URL-valued fields are fetched and embedded as images.
    /// This is what makes an index multimodal.
    #[serde(default)]
    pub treat_urls_and_pointers_as_images: bool,

    /// Whether embeddings are L2-normalized.
    #[serde(default = "default_true")]
    pub normalize_embeddings: bool,

    /// Text chunking configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_preprocessing: Option<TextPreprocessing>,

    /// Approximate-nearest-neighbour index parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ann_parameters: Option<AnnParameters>,
}

fn default_true() -> bool {
    true
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            model: None,
            treat_urls_and_pointers_as_images: false,
            normalize_embeddings: true,
            text_preprocessing: None,
            ann_parameters: None,
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPreprocessing {
    pub split_length: u32,
    pub split_overlap: u32,
    pub split_method: String,
}

/// HNSW parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnParameters {
    pub space_type: String,
    pub parameters: HnswParameters,
}

/// HNSW graph construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HnswParameters {
    pub ef_construction: u32,
    pub m: u32,
}

/// Response from index creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexResponse {
    pub acknowledged: bool,
    /// Name of the created index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Response from index deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteIndexResponse {
    pub acknowledged: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListIndexesResponse {
    pub results: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexEntry {
    pub index_name: String,
}

/// Wire body for `POST /indexes/{name}/documents`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddDocumentsBody<'a> {
    pub documents: &'a [Value],
    pub tensor_fields: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<&'a Value>,
}

/// Per-document result from an add-documents call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// Document identifier assigned or echoed by the engine.
    #[serde(rename = "_id")]
    pub id: String,

    /// HTTP-style status code for this document.
    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for one transport-level chunk of an add-documents call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentsResponse {
    /// True when at least one item in this chunk failed.
    pub errors: bool,

    #[serde(default)]
    pub items: Vec<ItemResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

/// Parameters for a search call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,

    pub limit: usize,

    pub offset: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,

    /// One of `TENSOR`, `LEXICAL`, `HYBRID`.
    pub search_method: String,

    /// Override for the engine's candidate-pool size (default 2000).
    /// Required for deep pagination, otherwise recall silently truncates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ef_search: Option<usize>,
}

impl SearchRequest {
    /// Create a tensor search request with engine defaults.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: 10,
            offset: 0,
            searchable_attributes: None,
            search_method: "TENSOR".to_string(),
            ef_search: None,
        }
    }
}

/// Response from a search call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Value>,

    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub processing_time_ms: Option<f64>,
}
