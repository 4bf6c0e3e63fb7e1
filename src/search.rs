//! Search client driving a paged source to completion.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::engines::{GoogleConfig, GoogleCustomSearch};
use crate::{EngineKind, PageSource, Pager, Result, SearchRequest, SearchResult};

/// Collects results from a paged search backend.
pub struct SearchClient {
    source: Arc<dyn PageSource>,
}

impl SearchClient {
    /// Creates a client over any page source.
    pub fn new<S: PageSource + 'static>(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Creates a client over a shared page source.
    pub fn with_source(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Creates a client for one of the supported engines.
    pub fn for_engine(kind: EngineKind, config: GoogleConfig) -> Result<Self> {
        match kind {
            EngineKind::Google => Ok(Self::new(GoogleCustomSearch::new(config)?)),
        }
    }

    /// Returns the backend name.
    pub fn engine_name(&self) -> &str {
        self.source.name()
    }

    /// Returns a lazy pager over the request's result pages.
    pub fn pages(&self, request: &SearchRequest) -> Result<Pager> {
        Pager::new(Arc::clone(&self.source), request)
    }

    /// Fetches up to `max_results` results in upstream order.
    ///
    /// Any page failure fails the whole call; results already fetched are
    /// discarded.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let start = Instant::now();
        let mut pager = self.pages(request)?;

        let mut results = Vec::new();
        while let Some(page) = pager.next_page().await {
            results.extend(page?);
        }
        results.truncate(request.max_results as usize);

        debug!(
            "Search for {:?} fetched {} results up to start index {}, kept {} in {}ms",
            request.query,
            pager.collected(),
            pager.start_index(),
            results.len(),
            start.elapsed().as_millis()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedSource;
    use crate::{Page, SearchError};

    fn items(n: usize, offset: usize) -> Vec<SearchResult> {
        (offset..offset + n)
            .map(|i| SearchResult::new(format!("http://example.com/{}", i), format!("Result {}", i), ""))
            .collect()
    }

    fn client(source: &Arc<ScriptedSource>) -> SearchClient {
        SearchClient::with_source(source.clone())
    }

    #[tokio::test]
    async fn test_search_rejects_too_many_results_without_fetching() {
        let source = Arc::new(ScriptedSource::new().page(0, Page::new(items(10, 0), None)));
        let request = SearchRequest::new("rust").with_max_results(101);
        let result = client(&source).search(&request).await;
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query_without_fetching() {
        let source = Arc::new(ScriptedSource::new());
        let result = client(&source).search(&SearchRequest::new("  ")).await;
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_stops_when_enough_results() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(10, 0), Some(11)))
                .page(11, Page::new(items(10, 10), Some(21))),
        );
        let request = SearchRequest::new("rust").with_max_results(5);
        let results = client(&source).search(&request).await.unwrap();
        assert_eq!(source.calls(), vec![0]);
        assert_eq!(results.len(), 5);
        assert_eq!(results[4].link, "http://example.com/4");
    }

    #[tokio::test]
    async fn test_search_stops_when_next_start_reaches_max_results() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(3, 0), Some(20)))
                .page(20, Page::new(items(3, 3), None)),
        );
        let request = SearchRequest::new("rust").with_max_results(15);
        let results = client(&source).search(&request).await.unwrap();
        assert_eq!(source.calls(), vec![0]);
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_stops_at_api_ceiling() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(1, 0), Some(50)))
                .page(50, Page::new(items(1, 1), Some(100)))
                .page(100, Page::new(items(1, 2), None)),
        );
        let request = SearchRequest::new("rust").with_max_results(100);
        let results = client(&source).search(&request).await.unwrap();
        assert_eq!(source.calls(), vec![0, 50]);
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_stops_without_next_cursor() {
        let source = Arc::new(ScriptedSource::new().page(0, Page::new(items(4, 0), None)));
        let request = SearchRequest::new("rust").with_max_results(50);
        let results = client(&source).search(&request).await.unwrap();
        assert_eq!(source.calls(), vec![0]);
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_search_concatenates_pages_in_order() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(10, 0), Some(11)))
                .page(11, Page::new(items(10, 10), Some(21)))
                .page(21, Page::new(items(10, 20), Some(31))),
        );
        let request = SearchRequest::new("rust").with_max_results(25);
        let results = client(&source).search(&request).await.unwrap();
        assert_eq!(source.calls(), vec![0, 11, 21]);
        assert_eq!(results.len(), 25);
        let links: Vec<_> = results.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links[0], "http://example.com/0");
        assert_eq!(links[10], "http://example.com/10");
        assert_eq!(links[24], "http://example.com/24");
    }

    #[tokio::test]
    async fn test_search_keeps_upstream_duplicates() {
        let dup = SearchResult::new("http://example.com/same", "Same", "");
        let source = Arc::new(
            ScriptedSource::new().page(0, Page::new(vec![dup.clone(), dup], None)),
        );
        let results = client(&source).search(&SearchRequest::new("q")).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_discards_partial_results_on_failure() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(10, 0), Some(11)))
                .fail(11, 500),
        );
        let request = SearchRequest::new("rust").with_max_results(20);
        let result = client(&source).search(&request).await;
        assert_eq!(source.calls(), vec![0, 11]);
        match result {
            Err(e) => assert!(e.is_upstream()),
            Ok(_) => panic!("expected upstream failure"),
        }
    }

    #[tokio::test]
    async fn test_pages_exposes_progress() {
        let source = Arc::new(
            ScriptedSource::new()
                .page(0, Page::new(items(10, 0), Some(11)))
                .page(11, Page::new(items(10, 10), None)),
        );
        let request = SearchRequest::new("rust").with_max_results(30);
        let mut pager = client(&source).pages(&request).unwrap();

        pager.next_page().await.unwrap().unwrap();
        assert_eq!(pager.collected(), 10);
        assert_eq!(pager.start_index(), 11);
        assert!(!pager.is_exhausted());

        pager.next_page().await.unwrap().unwrap();
        assert_eq!(pager.collected(), 20);
        assert!(pager.is_exhausted());
    }

    #[test]
    fn test_search_client_for_engine() {
        let client = SearchClient::for_engine(EngineKind::Google, GoogleConfig::new("k", "c")).unwrap();
        assert_eq!(client.engine_name(), "google");
    }

    #[test]
    fn test_search_blocking() {
        let source = Arc::new(ScriptedSource::new().page(0, Page::new(items(2, 0), None)));
        let results = tokio_test::block_on(client(&source).search(&SearchRequest::new("q"))).unwrap();
        assert_eq!(results.len(), 2);
    }
}
