//! Search request representation.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Hard ceiling on results (and start index) imposed by the upstream API.
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Number of results requested when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// A search request: the terms plus how many results to gather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search terms.
    pub query: String,
    /// Maximum number of results to return (1..=100).
    pub max_results: u32,
}

impl SearchRequest {
    /// Creates a new request with the default result count.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Checks the request before any network call is made.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidArgument("query cannot be empty".into()));
        }
        if self.max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::InvalidArgument(format!(
                "maxResults cannot exceed {}",
                MAX_RESULTS_LIMIT
            )));
        }
        if self.max_results == 0 {
            return Err(SearchError::InvalidArgument(
                "maxResults must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
