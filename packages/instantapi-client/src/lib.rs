//! Pure InstantAPI REST client.
//!
//! A minimal client for the InstantAPI structured-extraction service.
//! Supports the `/retrieve/` endpoint (turn a webpage into a record of a
//! caller-supplied shape) and the `/next_pages/` endpoint (related-page
//! discovery).
//!
//! # Example
//!
//! ```rust,ignore
//! use instantapi_client::{InstantApiClient, RetrieveRequest};
//!
//! let client = InstantApiClient::new("your-api-key");
//!
//! let request = RetrieveRequest::new(
//!     "https://example.com/product/42",
//!     "getProductListingDetails",
//!     serde_json::json!({"title": "<the name of the product (string)>"}),
//! );
//! let record = client.retrieve(&request).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{InstantApiError, Result};
pub use types::{NextPagesResponse, RetrieveRequest};

use serde_json::Value;
use types::{NextPagesPayload, RetrievePayload};

const BASE_URL: &str = "https://instantapi.ai/api";

pub struct InstantApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl InstantApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (testing, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Call `/retrieve/` and return the extracted record.
    ///
    /// The response is whatever JSON object the service produced for the
    /// requested structure; shape validation is the caller's concern.
    pub async fn retrieve(&self, request: &RetrieveRequest) -> Result<Value> {
        // Structured response shapes are sent as a JSON-encoded string.
        let api_response_structure = match &request.api_response_structure {
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };

        let payload = RetrievePayload {
            webpage_url: &request.webpage_url,
            api_method_name: &request.api_method_name,
            api_response_structure,
            api_key: &self.api_key,
            api_parameters: request.api_parameters.as_ref(),
            country_code: request.country_code.as_deref(),
            verbose: request.verbose,
            wait_for_xpath: request.wait_for_xpath.as_deref(),
            enable_javascript: request.enable_javascript,
            cache_ttl: request.cache_ttl,
            serp_limit: request.serp_limit,
            serp_site: request.serp_site.as_deref(),
            serp_page_num: request.serp_page_num,
        };

        tracing::debug!(
            webpage_url = %request.webpage_url,
            api_method_name = %request.api_method_name,
            "InstantAPI retrieve"
        );

        let url = format!("{}/retrieve/", self.base_url);
        let resp = self.client.post(&url).json(&payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InstantApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Call `/next_pages/` and return the related URLs for a page.
    pub async fn next_pages(&self, webpage_url: &str) -> Result<Vec<String>> {
        let payload = NextPagesPayload {
            webpage_url,
            api_key: &self.api_key,
        };

        let url = format!("{}/next_pages/", self.base_url);
        let resp = self.client.post(&url).json(&payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InstantApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let next: NextPagesResponse = resp.json().await?;
        tracing::debug!(
            webpage_url,
            discovered = next.webpage_urls.len(),
            "InstantAPI next_pages"
        );
        Ok(next.webpage_urls)
    }
}
