//! Trait seams for the two external collaborators.
//!
//! The adapter drives everything through these narrow interfaces so the
//! pipeline and crawler can be exercised against the mocks in
//! [`crate::testing`] without network access. The concrete
//! implementations are the pure REST clients from `instantapi-client`
//! and `marqo-client`.

use async_trait::async_trait;
use serde_json::Value;

use instantapi_client::{InstantApiClient, RetrieveRequest};
use marqo_client::{
    AddDocumentsResponse, CreateIndexResponse, DeleteIndexResponse, IndexSettings, MarqoClient,
    SearchRequest, SearchResponse,
};

use crate::error::Result;

/// Structured page extraction plus related-page discovery.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Extract a record of the requested structure from a webpage.
    async fn retrieve(
        &self,
        webpage_url: &str,
        api_method_name: &str,
        api_response_structure: &Value,
    ) -> Result<Value>;

    /// Discover pages related to a webpage.
    async fn next_pages(&self, webpage_url: &str) -> Result<Vec<String>>;
}

/// The index-engine operations the adapter consumes.
#[async_trait]
pub trait IndexEngine: Send + Sync {
    async fn list_indexes(&self) -> Result<Vec<String>>;

    async fn index_settings(&self, index_name: &str) -> Result<IndexSettings>;

    async fn create_index(
        &self,
        index_name: &str,
        settings: &IndexSettings,
    ) -> Result<CreateIndexResponse>;

    async fn delete_index(&self, index_name: &str) -> Result<DeleteIndexResponse>;

    /// Submit documents, chunked into groups of `client_batch_size`.
    /// Returns one response per chunk, in submission order.
    async fn add_documents(
        &self,
        index_name: &str,
        documents: &[Value],
        tensor_fields: &[String],
        mappings: Option<&Value>,
        client_batch_size: usize,
    ) -> Result<Vec<AddDocumentsResponse>>;

    async fn search(&self, index_name: &str, request: &SearchRequest) -> Result<SearchResponse>;
}

#[async_trait]
impl PageExtractor for InstantApiClient {
    async fn retrieve(
        &self,
        webpage_url: &str,
        api_method_name: &str,
        api_response_structure: &Value,
    ) -> Result<Value> {
        let request = RetrieveRequest::new(
            webpage_url,
            api_method_name,
            api_response_structure.clone(),
        );
        Ok(InstantApiClient::retrieve(self, &request).await?)
    }

    async fn next_pages(&self, webpage_url: &str) -> Result<Vec<String>> {
        Ok(InstantApiClient::next_pages(self, webpage_url).await?)
    }
}

#[async_trait]
impl IndexEngine for MarqoClient {
    async fn list_indexes(&self) -> Result<Vec<String>> {
        Ok(MarqoClient::list_indexes(self).await?)
    }

    async fn index_settings(&self, index_name: &str) -> Result<IndexSettings> {
        Ok(MarqoClient::index_settings(self, index_name).await?)
    }

    async fn create_index(
        &self,
        index_name: &str,
        settings: &IndexSettings,
    ) -> Result<CreateIndexResponse> {
        Ok(MarqoClient::create_index(self, index_name, settings).await?)
    }

    async fn delete_index(&self, index_name: &str) -> Result<DeleteIndexResponse> {
        Ok(MarqoClient::delete_index(self, index_name).await?)
    }

    async fn add_documents(
        &self,
        index_name: &str,
        documents: &[Value],
        tensor_fields: &[String],
        mappings: Option<&Value>,
        client_batch_size: usize,
    ) -> Result<Vec<AddDocumentsResponse>> {
        Ok(MarqoClient::add_documents(
            self,
            index_name,
            documents,
            tensor_fields,
            mappings,
            client_batch_size,
        )
        .await?)
    }

    async fn search(&self, index_name: &str, request: &SearchRequest) -> Result<SearchResponse> {
        Ok(MarqoClient::search(self, index_name, request).await?)
    }
}
