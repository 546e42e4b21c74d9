//! Request and response types for the InstantAPI endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for the `/retrieve/` endpoint.
///
/// Only `webpage_url`, `api_method_name` and `api_response_structure` are
/// required; everything else is an optional knob forwarded verbatim.
///
/// # Example
///
/// ```rust,ignore
/// let request = RetrieveRequest::new(
///     "https://example.com/item/1",
///     "getProductListingDetails",
///     serde_json::json!({"title": "<the name of the product (string)>"}),
/// )
/// .with_country_code("us")
/// .with_enable_javascript(true);
/// ```
#[derive(Debug, Clone)]
pub struct RetrieveRequest {
    /// URL of the webpage to retrieve data from.
    pub webpage_url: String,

    /// Name of the API method to use.
    pub api_method_name: String,

    /// Desired structure of the response. Objects are JSON-encoded into a
    /// string before being sent, matching what the endpoint expects.
    pub api_response_structure: Value,

    /// Parameters to pass to the API method.
    pub api_parameters: Option<Value>,

    /// Country code to proxy the request through.
    pub country_code: Option<String>,

    /// Request verbose output.
    pub verbose: bool,

    /// XPath to wait for before the page is considered loaded.
    pub wait_for_xpath: Option<String>,

    /// Whether to enable JavaScript in the headless browser.
    pub enable_javascript: Option<bool>,

    /// Time-to-live for the server-side cache, in seconds.
    pub cache_ttl: Option<u64>,

    /// Number of results to return for SERP requests.
    pub serp_limit: Option<u32>,

    /// Site to restrict SERP requests to.
    pub serp_site: Option<String>,

    /// Page number for SERP requests.
    pub serp_page_num: Option<u32>,
}

impl RetrieveRequest {
    /// Create a request with the required fields only.
    pub fn new(
        webpage_url: impl Into<String>,
        api_method_name: impl Into<String>,
        api_response_structure: Value,
    ) -> Self {
        Self {
            webpage_url: webpage_url.into(),
            api_method_name: api_method_name.into(),
            api_response_structure,
            api_parameters: None,
            country_code: None,
            verbose: false,
            wait_for_xpath: None,
            enable_javascript: None,
            cache_ttl: None,
            serp_limit: None,
            serp_site: None,
            serp_page_num: None,
        }
    }

    /// Set method parameters.
    pub fn with_api_parameters(mut self, parameters: Value) -> Self {
        self.api_parameters = Some(parameters);
        self
    }

    /// Set the proxy country code.
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Request verbose output.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Wait for an XPath before returning the page.
    pub fn with_wait_for_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.wait_for_xpath = Some(xpath.into());
        self
    }

    /// Enable or disable JavaScript rendering.
    pub fn with_enable_javascript(mut self, enabled: bool) -> Self {
        self.enable_javascript = Some(enabled);
        self
    }

    /// Set the cache TTL in seconds.
    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache_ttl = Some(ttl_secs);
        self
    }

    /// Set the SERP result limit.
    pub fn with_serp_limit(mut self, limit: u32) -> Self {
        self.serp_limit = Some(limit);
        self
    }

    /// Restrict SERP requests to a site.
    pub fn with_serp_site(mut self, site: impl Into<String>) -> Self {
        self.serp_site = Some(site.into());
        self
    }

    /// Set the SERP page number.
    pub fn with_serp_page_num(mut self, page: u32) -> Self {
        self.serp_page_num = Some(page);
        self
    }
}

/// Wire payload for `/retrieve/`. The response structure travels as a
/// JSON-encoded string and the API key rides in the body.
#[derive(Debug, Serialize)]
pub(crate) struct RetrievePayload<'a> {
    pub webpage_url: &'a str,
    pub api_method_name: &'a str,
    pub api_response_structure: String,
    pub api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_parameters: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub verbose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_xpath: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_javascript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serp_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serp_site: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serp_page_num: Option<u32>,
}

/// Wire payload for `/next_pages/`.
#[derive(Debug, Serialize)]
pub(crate) struct NextPagesPayload<'a> {
    pub webpage_url: &'a str,
    pub api_key: &'a str,
}

/// Response from the `/next_pages/` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NextPagesResponse {
    /// Related pages discovered for the submitted URL.
    #[serde(default)]
    pub webpage_urls: Vec<String>,
}
