//! Error types for the search client.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while searching or rendering.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Caller supplied an invalid argument (query, max results, output kind).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested search engine has no implementation.
    #[error("Unsupported search engine: {0}")]
    UnsupportedEngine(String),

    /// Requested feature exists by name but is not implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Upstream API answered with a non-success status.
    #[error("Upstream API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Local output rendering failed.
    #[error("Failed to render output: {0}")]
    Render(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Returns true when the error came from talking to the search API.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Http(_) | Self::Parse(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidArgument(format!("bad URL: {}", err))
    }
}
