//! Pure Marqo REST API client.
//!
//! A minimal client for the Marqo vector search engine. Covers the
//! operations an ingestion adapter needs: index lifecycle, document
//! submission with client-side batching, and search.
//!
//! # Example
//!
//! ```rust,ignore
//! use marqo_client::{MarqoClient, IndexSettings, SearchRequest};
//!
//! let client = MarqoClient::new("http://localhost:8882", None);
//!
//! let settings = IndexSettings {
//!     model: Some("hf/e5-base-v2".to_string()),
//!     ..Default::default()
//! };
//! client.create_index("my-index", &settings).await?;
//!
//! let results = client.search("my-index", &SearchRequest::new("coffee mug")).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MarqoError, Result};
pub use types::{
    AddDocumentsResponse, AnnParameters, CreateIndexResponse, DeleteIndexResponse, HnswParameters,
    IndexSettings, ItemResult, SearchRequest, SearchResponse, TextPreprocessing,
};

use reqwest::RequestBuilder;
use serde_json::Value;
use types::{AddDocumentsBody, ListIndexesResponse};

pub struct MarqoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MarqoClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    async fn check<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MarqoError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }

    /// List the names of all indexes on the instance.
    pub async fn list_indexes(&self) -> Result<Vec<String>> {
        let url = format!("{}/indexes", self.base_url);
        let resp = self.authorize(self.client.get(&url)).send().await?;
        let list: ListIndexesResponse = Self::check(resp).await?;
        Ok(list.results.into_iter().map(|e| e.index_name).collect())
    }

    /// Fetch the settings an index was created with.
    pub async fn index_settings(&self, index_name: &str) -> Result<IndexSettings> {
        let url = format!("{}/indexes/{}/settings", self.base_url, index_name);
        let resp = self.authorize(self.client.get(&url)).send().await?;
        Self::check(resp).await
    }

    /// Create an index with the given settings.
    pub async fn create_index(
        &self,
        index_name: &str,
        settings: &IndexSettings,
    ) -> Result<CreateIndexResponse> {
        tracing::info!(index_name, model = ?settings.model, "Creating Marqo index");
        let url = format!("{}/indexes/{}", self.base_url, index_name);
        let resp = self
            .authorize(self.client.post(&url))
            .json(settings)
            .send()
            .await?;
        Self::check(resp).await
    }

    /// Delete an index.
    pub async fn delete_index(&self, index_name: &str) -> Result<DeleteIndexResponse> {
        tracing::info!(index_name, "Deleting Marqo index");
        let url = format!("{}/indexes/{}", self.base_url, index_name);
        let resp = self.authorize(self.client.delete(&url)).send().await?;
        Self::check(resp).await
    }

    /// Submit documents to an index.
    ///
    /// The document list is chunked client-side into groups of
    /// `client_batch_size`, one POST per chunk, mirroring the official
    /// client's `client_batch_size` behavior. Returns one response per
    /// chunk, in submission order.
    pub async fn add_documents(
        &self,
        index_name: &str,
        documents: &[Value],
        tensor_fields: &[String],
        mappings: Option<&Value>,
        client_batch_size: usize,
    ) -> Result<Vec<AddDocumentsResponse>> {
        let url = format!("{}/indexes/{}/documents", self.base_url, index_name);
        let batch_size = client_batch_size.max(1);
        let mut responses = Vec::with_capacity(documents.len().div_ceil(batch_size));

        for chunk in documents.chunks(batch_size) {
            let body = AddDocumentsBody {
                documents: chunk,
                tensor_fields,
                mappings,
            };
            let resp = self
                .authorize(self.client.post(&url))
                .json(&body)
                .send()
                .await?;
            let response: AddDocumentsResponse = Self::check(resp).await?;
            tracing::debug!(
                index_name,
                chunk_size = chunk.len(),
                errors = response.errors,
                "Submitted document chunk"
            );
            responses.push(response);
        }

        Ok(responses)
    }

    /// Run a search against an index.
    pub async fn search(&self, index_name: &str, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/indexes/{}/search", self.base_url, index_name);
        let resp = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;
        Self::check(resp).await
    }
}
