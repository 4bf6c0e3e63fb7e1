//! Paged search source trait and the closed set of engine backends.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, SearchError, SearchResult};

/// One response from a paged search API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Results on this page, in upstream relevance order.
    pub items: Vec<SearchResult>,
    /// Start index of the following page; `None` on the last page.
    pub next_start_index: Option<u32>,
}

impl Page {
    /// Creates a page.
    pub fn new(items: Vec<SearchResult>, next_start_index: Option<u32>) -> Self {
        Self {
            items,
            next_start_index,
        }
    }

    /// Returns true when the upstream reported no further pages.
    pub fn is_last(&self) -> bool {
        self.next_start_index.is_none()
    }
}

/// Trait for paged search backends.
///
/// One call fetches exactly one page; pagination policy lives in
/// [`Pager`](crate::Pager).
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the engine name.
    fn name(&self) -> &str;

    /// Fetches the page of results for `query` beginning at `start_index`.
    async fn fetch_page(&self, query: &str, start_index: u32) -> Result<Page>;
}

/// Supported search engine backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Google Custom Search JSON API.
    #[default]
    Google,
}

impl EngineKind {
    /// Returns the name used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(Self::Google),
            other => Err(SearchError::UnsupportedEngine(other.to_string())),
        }
    }
}
