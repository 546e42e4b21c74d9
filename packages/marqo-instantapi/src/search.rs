//! Thin search facade over the engine's search call.

use std::str::FromStr;

use marqo_client::{SearchRequest, SearchResponse};

use crate::adapter::InstantApiMarqoAdapter;
use crate::error::{AdapterError, Result};
use crate::traits::{IndexEngine, PageExtractor};

/// The engine's default candidate-pool size. Pagination past this point
/// needs an explicit search-depth override or recall silently truncates.
pub const DEFAULT_SEARCH_DEPTH: usize = 2000;

/// How a query is matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    /// Vector-similarity search.
    #[default]
    Tensor,
    /// Keyword search.
    Lexical,
    /// Rank-fused combination of both.
    Hybrid,
}

impl SearchMethod {
    /// Wire name the engine expects.
    pub fn as_wire(&self) -> &'static str {
        match self {
            SearchMethod::Tensor => "TENSOR",
            SearchMethod::Lexical => "LEXICAL",
            SearchMethod::Hybrid => "HYBRID",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tensor" => Ok(SearchMethod::Tensor),
            "lexical" => Ok(SearchMethod::Lexical),
            "hybrid" => Ok(SearchMethod::Hybrid),
            other => Err(AdapterError::InvalidSearchMethod(other.to_string())),
        }
    }
}

/// Parameters for a search call.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    limit: usize,
    offset: usize,
    searchable_attributes: Option<Vec<String>>,
    method: SearchMethod,
}

impl SearchParams {
    /// Defaults: limit 10, offset 0, tensor search over all attributes.
    pub fn new() -> Self {
        Self {
            limit: 10,
            ..Default::default()
        }
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the pagination offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Restrict the attributes searched.
    pub fn with_searchable_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.searchable_attributes = Some(attributes.into_iter().map(|a| a.into()).collect());
        self
    }

    /// Set the search method.
    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }
}

impl<X: PageExtractor, E: IndexEngine> InstantApiMarqoAdapter<X, E> {
    /// Search an index.
    ///
    /// When `limit + offset` exceeds the engine's default candidate pool,
    /// the search depth is widened to match so deep pages keep full
    /// recall.
    pub async fn search(
        &self,
        q: &str,
        index_name: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse> {
        let wanted = params.limit + params.offset;
        let ef_search = (wanted > DEFAULT_SEARCH_DEPTH).then_some(wanted);

        let request = SearchRequest {
            q: q.to_string(),
            limit: params.limit,
            offset: params.offset,
            searchable_attributes: params.searchable_attributes.clone(),
            search_method: params.method.as_wire().to_string(),
            ef_search,
        };

        self.engine.search(index_name, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockExtractor, MockIndexEngine};
    use serde_json::json;

    fn adapter() -> InstantApiMarqoAdapter<MockExtractor, MockIndexEngine> {
        InstantApiMarqoAdapter::new(MockExtractor::new(), MockIndexEngine::new())
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("tensor".parse::<SearchMethod>().unwrap(), SearchMethod::Tensor);
        assert_eq!("LEXICAL".parse::<SearchMethod>().unwrap(), SearchMethod::Lexical);
        assert_eq!("Hybrid".parse::<SearchMethod>().unwrap(), SearchMethod::Hybrid);

        let err = "semantic".parse::<SearchMethod>().unwrap_err();
        assert!(matches!(err, AdapterError::InvalidSearchMethod(_)));
    }

    #[tokio::test]
    async fn test_search_passes_through_hits() {
        let adapter = adapter();
        adapter
            .engine()
            .set_hits("coffee mug", vec![json!({"title": "Mug", "_score": 0.9})]);

        let response = adapter
            .search("coffee mug", "products", &SearchParams::new())
            .await
            .unwrap();
        assert_eq!(response.hits.len(), 1);

        let requests = adapter.engine().search_requests();
        assert_eq!(requests[0].search_method, "TENSOR");
        assert_eq!(requests[0].limit, 10);
        assert_eq!(requests[0].ef_search, None);
    }

    #[tokio::test]
    async fn test_deep_pagination_widens_search_depth() {
        let adapter = adapter();

        let params = SearchParams::new().with_limit(100).with_offset(1950);
        adapter.search("q", "products", &params).await.unwrap();

        let requests = adapter.engine().search_requests();
        assert_eq!(requests[0].ef_search, Some(2050));
    }

    #[tokio::test]
    async fn test_default_pagination_leaves_depth_alone() {
        let adapter = adapter();

        let params = SearchParams::new().with_limit(1000).with_offset(1000);
        adapter.search("q", "products", &params).await.unwrap();

        // Exactly at the pool boundary: no override needed.
        let requests = adapter.engine().search_requests();
        assert_eq!(requests[0].ef_search, None);
    }

    #[tokio::test]
    async fn test_searchable_attributes_and_method_forwarded() {
        let adapter = adapter();

        let params = SearchParams::new()
            .with_method(SearchMethod::Hybrid)
            .with_searchable_attributes(["title"]);
        adapter.search("q", "products", &params).await.unwrap();

        let requests = adapter.engine().search_requests();
        assert_eq!(requests[0].search_method, "HYBRID");
        assert_eq!(
            requests[0].searchable_attributes,
            Some(vec!["title".to_string()])
        );
    }
}
