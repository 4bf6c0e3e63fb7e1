//! Search result types.

use serde::{Deserialize, Serialize};

/// A single search hit as returned by the upstream API.
///
/// Field order is the serialization order, so JSON output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Absolute result URL.
    #[serde(default)]
    pub link: String,
    /// Host or shortened form of the link.
    #[serde(default)]
    pub display_link: String,
    /// Plain title.
    #[serde(default)]
    pub title: String,
    /// Title with match-highlighting markup.
    #[serde(default)]
    pub html_title: String,
    /// Plain snippet.
    #[serde(default)]
    pub snippet: String,
    /// Snippet with match-highlighting markup.
    #[serde(default)]
    pub html_snippet: String,
    /// Upstream resource kind (e.g. `customsearch#result`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Display form of the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_url: Option<String>,
    /// Display form of the URL with highlighting markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_formatted_url: Option<String>,
    /// Upstream cache identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_id: Option<String>,
}

impl SearchResult {
    /// Creates a new result. The html fields start out equal to the plain ones.
    pub fn new(link: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        let link = link.into();
        let title = title.into();
        let snippet = snippet.into();
        Self {
            display_link: display_link_for(&link),
            html_title: title.clone(),
            html_snippet: snippet.clone(),
            link,
            title,
            snippet,
            ..Default::default()
        }
    }

    /// Sets the display link.
    pub fn with_display_link(mut self, display_link: impl Into<String>) -> Self {
        self.display_link = display_link.into();
        self
    }

    /// Sets the highlighted title.
    pub fn with_html_title(mut self, html_title: impl Into<String>) -> Self {
        self.html_title = html_title.into();
        self
    }

    /// Sets the highlighted snippet.
    pub fn with_html_snippet(mut self, html_snippet: impl Into<String>) -> Self {
        self.html_snippet = html_snippet.into();
        self
    }
}

fn display_link_for(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| link.to_string())
}
