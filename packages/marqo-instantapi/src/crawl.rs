//! Breadth-first crawl over a frontier of URLs.
//!
//! Each dequeued page goes through the full ingestion pipeline and the
//! frontier is expanded with the extraction service's related-page
//! lookup. No retries anywhere: a failed page shows up as a failure
//! outcome, a failed lookup just stops that branch of the traversal.
//!
//! # Domain filter
//!
//! A URL whose root domain appears in `allowed_domains` is SKIPPED, not
//! kept. This inverts what the parameter's name suggests, but it is the
//! long-observed behavior of this adapter and callers depend on passing
//! already-covered domains here. Preserved as-is pending a decision from
//! the system owner; see DESIGN.md.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::adapter::InstantApiMarqoAdapter;
use crate::domain::root_domain;
use crate::error::Result;
use crate::traits::{IndexEngine, PageExtractor};
use crate::types::{CrawlParams, IngestOutcome};

impl<X: PageExtractor, E: IndexEngine> InstantApiMarqoAdapter<X, E> {
    /// Crawl from a set of seed URLs, ingesting every visited page.
    ///
    /// Plain BFS: seeds first, then discovered pages in discovery order.
    /// A URL is never processed twice within one crawl. The `max_pages`
    /// cap bounds loop iterations (including skipped URLs) and exits
    /// early without draining the frontier. Outcomes accumulate in visit
    /// order.
    pub async fn crawl(
        &self,
        initial_webpage_urls: &[String],
        index_name: &str,
        params: &CrawlParams,
    ) -> Result<Vec<IngestOutcome>> {
        let mut frontier: VecDeque<String> = initial_webpage_urls.iter().cloned().collect();
        let mut visited: HashSet<String> = HashSet::new();
        let mut outcomes: Vec<IngestOutcome> = Vec::new();
        let mut pages = 0usize;

        info!(
            index_name,
            seeds = frontier.len(),
            max_pages = ?params.max_pages,
            "Starting crawl"
        );

        while !frontier.is_empty() {
            pages += 1;
            if let Some(max_pages) = params.max_pages {
                if pages > max_pages {
                    info!(index_name, max_pages, "Page cap reached, stopping crawl");
                    break;
                }
            }

            let Some(webpage_url) = frontier.pop_front() else {
                break;
            };

            if !visited.insert(webpage_url.clone()) {
                debug!(webpage_url = %webpage_url, "Already visited, skipping");
                continue;
            }

            if let Some(domain) = root_domain(&webpage_url) {
                if params.allowed_domains.contains(&domain) {
                    debug!(webpage_url = %webpage_url, domain = %domain, "Domain filtered, skipping");
                    continue;
                }
            }

            let mut page_outcomes = self
                .add_documents(
                    std::slice::from_ref(&webpage_url),
                    index_name,
                    &params.ingest,
                )
                .await?;
            outcomes.append(&mut page_outcomes);

            match self.extractor.next_pages(&webpage_url).await {
                Ok(successors) => {
                    debug!(
                        webpage_url = %webpage_url,
                        discovered = successors.len(),
                        "Expanding frontier"
                    );
                    frontier.extend(successors);
                }
                Err(e) => {
                    warn!(webpage_url = %webpage_url, error = %e, "Related-pages lookup failed");
                }
            }
        }

        info!(
            index_name,
            visited = visited.len(),
            outcomes = outcomes.len(),
            "Crawl finished"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ExtractorCall, MockExtractor, MockIndexEngine};
    use crate::types::AddDocumentsParams;
    use serde_json::json;

    fn page() -> serde_json::Value {
        json!({"title": "t", "content": "c"})
    }

    fn crawl_params() -> CrawlParams {
        CrawlParams::new(
            AddDocumentsParams::new(
                "getPageSummary",
                json!({"title": "the title", "content": "the content"}),
            )
            .with_text_fields(["title", "content"]),
        )
    }

    fn seeds(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    fn retrieved_urls(extractor: &MockExtractor) -> Vec<String> {
        extractor
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                ExtractorCall::Retrieve { webpage_url } => Some(webpage_url),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_page_cap_stops_before_draining_frontier() {
        let extractor = MockExtractor::new()
            .with_page("https://a.test/x", page())
            .with_page("https://a.test/y", page())
            .with_next_pages("https://a.test/x", &["https://a.test/y"]);
        let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

        let outcomes = adapter
            .crawl(
                &seeds(&["https://a.test/x"]),
                "crawl-index",
                &crawl_params().with_max_pages(1),
            )
            .await
            .unwrap();

        // Only the seed was processed; the discovered page stayed queued.
        assert_eq!(outcomes.len(), 1);
        assert_eq!(retrieved_urls(adapter.extractor()), vec!["https://a.test/x"]);
    }

    #[tokio::test]
    async fn test_visited_urls_are_never_reprocessed() {
        // x and y point at each other; the crawl must terminate with each
        // processed exactly once.
        let extractor = MockExtractor::new()
            .with_page("https://a.test/x", page())
            .with_page("https://a.test/y", page())
            .with_next_pages("https://a.test/x", &["https://a.test/y", "https://a.test/x"])
            .with_next_pages("https://a.test/y", &["https://a.test/x"]);
        let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

        let outcomes = adapter
            .crawl(&seeds(&["https://a.test/x"]), "crawl-index", &crawl_params())
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            retrieved_urls(adapter.extractor()),
            vec!["https://a.test/x", "https://a.test/y"]
        );
    }

    #[tokio::test]
    async fn test_listed_domains_are_skipped() {
        let extractor = MockExtractor::new()
            .with_page("https://keep.test/page", page())
            .with_page("https://skip.test/page", page());
        let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

        let params = crawl_params().with_allowed_domains(["skip.test"]);
        let outcomes = adapter
            .crawl(
                &seeds(&["https://skip.test/page", "https://keep.test/page"]),
                "crawl-index",
                &params,
            )
            .await
            .unwrap();

        // Membership causes exclusion (preserved inverted semantics).
        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            retrieved_urls(adapter.extractor()),
            vec!["https://keep.test/page"]
        );
    }

    #[tokio::test]
    async fn test_failed_next_pages_does_not_abort_crawl() {
        let extractor = MockExtractor::new()
            .with_page("https://a.test/x", page())
            .with_page("https://a.test/y", page())
            .with_next_pages_failure("https://a.test/x", "service unavailable");
        let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

        let outcomes = adapter
            .crawl(
                &seeds(&["https://a.test/x", "https://a.test/y"]),
                "crawl-index",
                &crawl_params(),
            )
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
    }

    #[tokio::test]
    async fn test_bfs_discovery_order() {
        let extractor = MockExtractor::new()
            .with_page("https://a.test/1", page())
            .with_page("https://a.test/2", page())
            .with_page("https://a.test/3", page())
            .with_next_pages("https://a.test/1", &["https://a.test/3"])
            .with_next_pages("https://a.test/2", &[]);
        let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

        adapter
            .crawl(
                &seeds(&["https://a.test/1", "https://a.test/2"]),
                "crawl-index",
                &crawl_params(),
            )
            .await
            .unwrap();

        // Seeds first, then discoveries: 3 is visited after both seeds.
        assert_eq!(
            retrieved_urls(adapter.extractor()),
            vec!["https://a.test/1", "https://a.test/2", "https://a.test/3"]
        );
    }
}
