//! Lazy page-by-page traversal of a paged search source.

use std::sync::Arc;

use futures::stream::{self, Stream};
use tracing::{debug, warn};

use crate::query::MAX_RESULTS_LIMIT;
use crate::{PageSource, Result, SearchRequest, SearchResult};

/// A finite, non-restartable sequence of result pages.
///
/// Each call to [`Pager::next_page`] issues at most one upstream request.
/// Paging stops as soon as enough results have been seen, the next start
/// index reaches `max_results` or the API ceiling, or the upstream reports
/// no further pages. After the first error or the end of the sequence the
/// pager stays exhausted.
pub struct Pager {
    source: Arc<dyn PageSource>,
    query: String,
    max_results: u32,
    start_index: u32,
    collected: usize,
    exhausted: bool,
}

impl Pager {
    /// Creates a pager for a validated request.
    pub fn new(source: Arc<dyn PageSource>, request: &SearchRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self {
            source,
            query: request.query.clone(),
            max_results: request.max_results,
            start_index: 0,
            collected: 0,
            exhausted: false,
        })
    }

    /// Start index the next request will use.
    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    /// Number of results yielded so far.
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Returns true once no further pages will be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted || !self.wants_more()
    }

    fn wants_more(&self) -> bool {
        self.collected < self.max_results as usize
            && self.start_index < self.max_results
            && self.start_index < MAX_RESULTS_LIMIT
    }

    /// Fetches the next page, or returns `None` when paging is over.
    pub async fn next_page(&mut self) -> Option<Result<Vec<SearchResult>>> {
        if self.is_exhausted() {
            self.exhausted = true;
            return None;
        }

        let page = match self.source.fetch_page(&self.query, self.start_index).await {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e));
            }
        };

        debug!(
            "Engine {} returned {} results at start index {} (next: {:?})",
            self.source.name(),
            page.items.len(),
            self.start_index,
            page.next_start_index
        );

        self.collected += page.items.len();
        match page.next_start_index {
            Some(next) if next > self.start_index => self.start_index = next,
            Some(next) => {
                warn!(
                    "Engine {} reported next start index {} not after {}, stopping",
                    self.source.name(),
                    next,
                    self.start_index
                );
                self.exhausted = true;
            }
            None => self.exhausted = true,
        }

        Some(Ok(page.items))
    }

    /// Turns the pager into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<SearchResult>>> {
        stream::unfold(self, |mut pager| async move {
            pager.next_page().await.map(|page| (page, pager))
        })
    }
}
