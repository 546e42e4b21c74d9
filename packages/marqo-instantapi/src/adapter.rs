//! The adapter itself: one value owning the two external collaborators.

use instantapi_client::InstantApiClient;
use marqo_client::MarqoClient;

use crate::index::IndexDefaults;
use crate::mappings::COMBINATION_FIELD;
use crate::traits::{IndexEngine, PageExtractor};

/// Adapter between the InstantAPI extraction service and a Marqo index.
///
/// Generic over its collaborators so tests can swap in the mocks from
/// [`crate::testing`]; production code uses [`InstantApiMarqoAdapter::connect`]
/// to wire up the real clients.
pub struct InstantApiMarqoAdapter<X, E> {
    pub(crate) extractor: X,
    pub(crate) engine: E,
    pub(crate) defaults: IndexDefaults,
    pub(crate) combination_field: String,
}

impl<X: PageExtractor, E: IndexEngine> InstantApiMarqoAdapter<X, E> {
    /// Create an adapter from explicit collaborators.
    pub fn new(extractor: X, engine: E) -> Self {
        Self {
            extractor,
            engine,
            defaults: IndexDefaults::default(),
            combination_field: COMBINATION_FIELD.to_string(),
        }
    }

    /// Replace the index-creation defaults.
    pub fn with_defaults(mut self, defaults: IndexDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Rename the synthetic combined field.
    pub fn with_combination_field(mut self, name: impl Into<String>) -> Self {
        self.combination_field = name.into();
        self
    }

    /// Borrow the extraction collaborator.
    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    /// Borrow the index-engine collaborator.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl InstantApiMarqoAdapter<InstantApiClient, MarqoClient> {
    /// Default local Marqo endpoint.
    pub const DEFAULT_MARQO_URL: &'static str = "http://localhost:8882";

    /// Wire up the real clients.
    pub fn connect(
        marqo_url: &str,
        marqo_api_key: Option<String>,
        instantapi_key: &str,
    ) -> Self {
        Self::new(
            InstantApiClient::new(instantapi_key),
            MarqoClient::new(marqo_url, marqo_api_key),
        )
    }
}
