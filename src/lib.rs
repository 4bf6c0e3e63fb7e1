//! # kessler-search
//!
//! A small client for paged web search APIs.
//!
//! - Pages through the Google Custom Search JSON API until enough results
//!   are collected or the API runs out of pages
//! - Renders the results as JSON, a link table, an HTML page or plain link
//!   lists
//! - Layered settings from config files and the environment
//!
//! ## Example
//!
//! ```rust,no_run
//! use kessler_search::{engines::GoogleConfig, EngineKind, OutputKind, SearchClient, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SearchClient::for_engine(EngineKind::Google, GoogleConfig::new("api-key", "cx"))?;
//!
//!     let request = SearchRequest::new("rust programming").with_max_results(20);
//!     let results = client.search(&request).await?;
//!
//!     println!("{}", OutputKind::LinksText.render(&results, "")?);
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod pager;
mod query;
mod result;
mod search;

pub mod engines;
pub mod render;
pub mod settings;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use engine::{EngineKind, Page, PageSource};
pub use error::{Result, SearchError};
pub use pager::Pager;
pub use query::{SearchRequest, DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT};
pub use render::OutputKind;
pub use result::SearchResult;
pub use search::SearchClient;
pub use settings::{Settings, SettingsSources};
