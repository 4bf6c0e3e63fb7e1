//! Google Custom Search JSON API backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{Page, PageSource, Result, SearchError, SearchResult};

/// Default API endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://customsearch.googleapis.com/";

const SEARCH_PATH: &str = "customsearch/v1";

/// Connection settings for the Custom Search API.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API key, passed through unchanged.
    pub api_key: String,
    /// Custom search engine (collection) identifier.
    pub cx: String,
    /// API root; overridden in tests.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl GoogleConfig {
    /// Creates a config pointing at the public API.
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cx: cx.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 10,
        }
    }

    /// Sets the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Google Custom Search engine.
pub struct GoogleCustomSearch {
    config: GoogleConfig,
    endpoint: Url,
    client: Client,
}

impl GoogleCustomSearch {
    /// Creates the engine and its HTTP client.
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("kessler-search/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Self::with_client(config, client)
    }

    /// Creates the engine with a caller-supplied reqwest client.
    pub fn with_client(config: GoogleConfig, client: Client) -> Result<Self> {
        let mut base = Url::parse(&config.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(SEARCH_PATH)?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    /// Returns the resolved request endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
    #[serde(default)]
    queries: CseQueries,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CseQueries {
    #[serde(default)]
    next_page: Vec<CseQueryInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseQueryInfo {
    start_index: u32,
}

#[derive(Deserialize)]
struct CseErrorResponse {
    error: CseError,
}

#[derive(Deserialize)]
struct CseError {
    message: String,
}

#[async_trait]
impl PageSource for GoogleCustomSearch {
    fn name(&self) -> &str {
        "google"
    }

    async fn fetch_page(&self, query: &str, start_index: u32) -> Result<Page> {
        let mut params = vec![
            ("key", self.config.api_key.clone()),
            ("cx", self.config.cx.clone()),
            ("q", query.to_string()),
        ];
        // The API numbers results from 1; index 0 means "first page".
        if start_index > 0 {
            params.push(("start", start_index.to_string()));
        }

        debug!("Requesting Google page at start index {}", start_index);
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_page(&body)
    }
}

fn parse_page(body: &str) -> Result<Page> {
    let response: CseResponse = serde_json::from_str(body)?;
    let next_start_index = response
        .queries
        .next_page
        .first()
        .map(|next| next.start_index);
    Ok(Page::new(response.items, next_start_index))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<CseErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
