//! Testing utilities including mock collaborators.
//!
//! These are useful for testing applications built on the adapter
//! without making real extraction or index-engine calls.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use instantapi_client::InstantApiError;
use marqo_client::{
    AddDocumentsResponse, CreateIndexResponse, DeleteIndexResponse, IndexSettings, ItemResult,
    MarqoError, SearchRequest, SearchResponse,
};

use crate::error::Result;
use crate::traits::{IndexEngine, PageExtractor};

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone)]
pub enum ExtractorCall {
    Retrieve { webpage_url: String },
    NextPages { webpage_url: String },
}

/// A mock extraction service with canned per-URL responses.
#[derive(Default)]
pub struct MockExtractor {
    pages: RwLock<HashMap<String, Value>>,
    failures: RwLock<HashMap<String, String>>,
    next_pages: RwLock<HashMap<String, Vec<String>>>,
    next_pages_failures: RwLock<HashMap<String, String>>,
    calls: RwLock<Vec<ExtractorCall>>,
}

impl MockExtractor {
    /// Create a mock with no canned responses. Any retrieve against it
    /// fails with a 404-shaped extraction error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned extraction response for a URL.
    pub fn with_page(self, webpage_url: impl Into<String>, response: Value) -> Self {
        self.pages.write().unwrap().insert(webpage_url.into(), response);
        self
    }

    /// Make extraction fail for a URL.
    pub fn with_failure(self, webpage_url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(webpage_url.into(), reason.into());
        self
    }

    /// Add canned related pages for a URL.
    pub fn with_next_pages(self, webpage_url: impl Into<String>, urls: &[&str]) -> Self {
        self.next_pages
            .write()
            .unwrap()
            .insert(webpage_url.into(), urls.iter().map(|u| u.to_string()).collect());
        self
    }

    /// Make the related-pages lookup fail for a URL.
    pub fn with_next_pages_failure(
        self,
        webpage_url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.next_pages_failures
            .write()
            .unwrap()
            .insert(webpage_url.into(), reason.into());
        self
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<ExtractorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageExtractor for MockExtractor {
    async fn retrieve(
        &self,
        webpage_url: &str,
        _api_method_name: &str,
        _api_response_structure: &Value,
    ) -> Result<Value> {
        self.calls.write().unwrap().push(ExtractorCall::Retrieve {
            webpage_url: webpage_url.to_string(),
        });

        if let Some(reason) = self.failures.read().unwrap().get(webpage_url) {
            return Err(InstantApiError::Api {
                status: 500,
                body: reason.clone(),
            }
            .into());
        }

        match self.pages.read().unwrap().get(webpage_url) {
            Some(response) => Ok(response.clone()),
            None => Err(InstantApiError::Api {
                status: 404,
                body: format!("no canned response for {webpage_url}"),
            }
            .into()),
        }
    }

    async fn next_pages(&self, webpage_url: &str) -> Result<Vec<String>> {
        self.calls.write().unwrap().push(ExtractorCall::NextPages {
            webpage_url: webpage_url.to_string(),
        });

        if let Some(reason) = self.next_pages_failures.read().unwrap().get(webpage_url) {
            return Err(InstantApiError::Api {
                status: 503,
                body: reason.clone(),
            }
            .into());
        }

        Ok(self
            .next_pages
            .read()
            .unwrap()
            .get(webpage_url)
            .cloned()
            .unwrap_or_default())
    }
}

/// One recorded add-documents call.
#[derive(Debug, Clone)]
pub struct Submission {
    pub index_name: String,
    pub documents: Vec<Value>,
    pub tensor_fields: Vec<String>,
    pub mappings: Option<Value>,
    pub client_batch_size: usize,
}

/// A mock index engine with an in-memory index registry.
///
/// Accepts every submitted document (item status 200) and serves canned
/// hits keyed by query text.
#[derive(Default)]
pub struct MockIndexEngine {
    indexes: RwLock<HashMap<String, IndexSettings>>,
    submissions: RwLock<Vec<Submission>>,
    hits: RwLock<HashMap<String, Vec<Value>>>,
    search_requests: RwLock<Vec<SearchRequest>>,
}

impl MockIndexEngine {
    /// Create a mock engine with no indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an index.
    pub fn with_index(self, index_name: impl Into<String>, settings: IndexSettings) -> Self {
        self.indexes.write().unwrap().insert(index_name.into(), settings);
        self
    }

    /// Set the hits returned for a query.
    pub fn set_hits(&self, q: impl Into<String>, hits: Vec<Value>) {
        self.hits.write().unwrap().insert(q.into(), hits);
    }

    /// Settings of a registered index.
    pub fn settings_for(&self, index_name: &str) -> Option<IndexSettings> {
        self.indexes.read().unwrap().get(index_name).cloned()
    }

    /// All recorded add-documents calls.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.read().unwrap().clone()
    }

    /// All recorded search requests.
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.search_requests.read().unwrap().clone()
    }
}

#[async_trait]
impl IndexEngine for MockIndexEngine {
    async fn list_indexes(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.indexes.read().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn index_settings(&self, index_name: &str) -> Result<IndexSettings> {
        self.settings_for(index_name).ok_or_else(|| {
            MarqoError::Api {
                status: 404,
                message: format!("index {index_name} not found"),
            }
            .into()
        })
    }

    async fn create_index(
        &self,
        index_name: &str,
        settings: &IndexSettings,
    ) -> Result<CreateIndexResponse> {
        self.indexes
            .write()
            .unwrap()
            .insert(index_name.to_string(), settings.clone());
        Ok(CreateIndexResponse {
            acknowledged: true,
            index: Some(index_name.to_string()),
        })
    }

    async fn delete_index(&self, index_name: &str) -> Result<DeleteIndexResponse> {
        match self.indexes.write().unwrap().remove(index_name) {
            Some(_) => Ok(DeleteIndexResponse { acknowledged: true }),
            None => Err(MarqoError::Api {
                status: 404,
                message: format!("index {index_name} not found"),
            }
            .into()),
        }
    }

    async fn add_documents(
        &self,
        index_name: &str,
        documents: &[Value],
        tensor_fields: &[String],
        mappings: Option<&Value>,
        client_batch_size: usize,
    ) -> Result<Vec<AddDocumentsResponse>> {
        self.submissions.write().unwrap().push(Submission {
            index_name: index_name.to_string(),
            documents: documents.to_vec(),
            tensor_fields: tensor_fields.to_vec(),
            mappings: mappings.cloned(),
            client_batch_size,
        });

        let responses = documents
            .chunks(client_batch_size.max(1))
            .map(|chunk| AddDocumentsResponse {
                errors: false,
                items: chunk
                    .iter()
                    .map(|doc| ItemResult {
                        id: doc
                            .get("_id")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown")
                            .to_string(),
                        status: 200,
                        message: None,
                        error: None,
                    })
                    .collect(),
                processing_time_ms: None,
                index_name: Some(index_name.to_string()),
            })
            .collect();

        Ok(responses)
    }

    async fn search(&self, index_name: &str, request: &SearchRequest) -> Result<SearchResponse> {
        self.search_requests.write().unwrap().push(request.clone());

        let hits = self
            .hits
            .read()
            .unwrap()
            .get(&request.q)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(index_name, q = %request.q, "Mock search served");
        Ok(SearchResponse {
            hits,
            query: Some(request.q.clone()),
            processing_time_ms: None,
        })
    }
}
