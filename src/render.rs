//! Output renderers.
//!
//! Every [`OutputKind`] maps to exactly one pure function from a result
//! sequence to text. Nothing here performs I/O; opening a rendered document
//! in a browser is left to [`crate::viewer`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::Serialize;
use serde::Deserialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Result, SearchError, SearchResult};

/// Field separator used by [`to_links_text_context`].
pub const CONTEXT_SEPARATOR: &str = "|||";

/// Output formats selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// Tab-indented JSON array of full results.
    #[default]
    Json,
    /// Link/title table; duplicate links collapse into one row.
    Table,
    /// Legacy text table; never implemented.
    TableText,
    /// Standalone HTML document.
    Html,
    /// HTML document opened in the default browser.
    HtmlBrowser,
    /// JSON array of links.
    Links,
    /// JSON array of link, title and snippet objects.
    LinksContext,
    /// One link per line.
    LinksText,
    /// One escaped `title ||| snippet ||| link` line per result.
    LinksTextContext,
}

impl OutputKind {
    /// All kinds, in the order shown in help text.
    pub const ALL: [OutputKind; 9] = [
        Self::Json,
        Self::Table,
        Self::TableText,
        Self::Html,
        Self::HtmlBrowser,
        Self::Links,
        Self::LinksContext,
        Self::LinksText,
        Self::LinksTextContext,
    ];

    /// Returns the command line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Table => "table",
            Self::TableText => "table-text",
            Self::Html => "html",
            Self::HtmlBrowser => "html-browser",
            Self::Links => "links",
            Self::LinksContext => "links-context",
            Self::LinksText => "links-text",
            Self::LinksTextContext => "links-text-context",
        }
    }

    /// Returns true when the output goes to a browser instead of stdout.
    pub fn opens_browser(&self) -> bool {
        matches!(self, Self::HtmlBrowser)
    }

    /// Renders `results` in this format. `page_title` is only used by the
    /// HTML kinds.
    pub fn render(&self, results: &[SearchResult], page_title: &str) -> Result<String> {
        match self {
            Self::Json => to_json(results),
            Self::Table => Ok(to_table(results)),
            Self::TableText => Err(SearchError::NotImplemented(
                "table-text output type".to_string(),
            )),
            Self::Html | Self::HtmlBrowser => Ok(to_html(results, page_title)),
            Self::Links => to_links(results),
            Self::LinksContext => to_links_context(results),
            Self::LinksText => Ok(to_links_text(results)),
            Self::LinksTextContext => Ok(to_links_text_context(results)),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                SearchError::InvalidArgument(format!("unsupported output type '{}'", s))
            })
    }
}

/// Builds the page title used by the HTML renderers.
pub fn page_title(engine: &str, query: &str, count: usize) -> String {
    format!("{} search: \"{}\" {} results", engine, query, count)
}

fn to_tab_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value
        .serialize(&mut ser)
        .map_err(|e| SearchError::Render(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| SearchError::Render(e.to_string()))
}

/// Full results as tab-indented JSON.
pub fn to_json(results: &[SearchResult]) -> Result<String> {
    to_tab_json(results)
}

/// Links as a tab-indented JSON array of strings.
pub fn to_links(results: &[SearchResult]) -> Result<String> {
    let links: Vec<&str> = results.iter().map(|r| r.link.as_str()).collect();
    to_tab_json(&links)
}

#[derive(serde::Serialize)]
struct LinkContext<'a> {
    link: &'a str,
    title: &'a str,
    snippet: &'a str,
}

/// Link, title and snippet of each result as a tab-indented JSON array.
pub fn to_links_context(results: &[SearchResult]) -> Result<String> {
    let items: Vec<LinkContext<'_>> = results
        .iter()
        .map(|r| LinkContext {
            link: &r.link,
            title: &r.title,
            snippet: &r.snippet,
        })
        .collect();
    to_tab_json(&items)
}

/// One link per line.
pub fn to_links_text(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.link.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes a field so it fits on one `|||`-separated line.
///
/// Backslashes are doubled first, so an escaped newline or separator can
/// always be told apart from the same characters in the input.
pub fn escape_context_field(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(CONTEXT_SEPARATOR, "\\|\\|\\|")
}

/// One `title: .. ||| snippet: .. ||| link: ..` line per result.
pub fn to_links_text_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "title: {} {sep} snippet: {} {sep} link: {}",
                escape_context_field(&r.title),
                escape_context_field(&r.snippet),
                escape_context_field(&r.link),
                sep = CONTEXT_SEPARATOR
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a `link | title` table.
///
/// Rows are keyed by link: a repeated link keeps its first position but takes
/// the last title seen, so duplicate links are silently collapsed.
pub fn to_table(results: &[SearchResult]) -> String {
    let mut rows: Vec<(&str, &str)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for r in results {
        match index.get(r.link.as_str()) {
            Some(&i) => rows[i].1 = r.title.as_str(),
            None => {
                index.insert(r.link.as_str(), rows.len());
                rows.push((r.link.as_str(), r.title.as_str()));
            }
        }
    }

    let width = |s: &str| s.chars().count();
    let link_width = rows.iter().map(|&(l, _)| width(l)).fold(width("link"), usize::max);
    let title_width = rows.iter().map(|&(_, t)| width(t)).fold(width("title"), usize::max);
    let row = |link: &str, title: &str| {
        format!(
            "| {}{} | {}{} |",
            link,
            " ".repeat(link_width - width(link)),
            title,
            " ".repeat(title_width - width(title))
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(row("link", "title"));
    lines.push(format!("|{}|{}|", "-".repeat(link_width + 2), "-".repeat(title_width + 2)));
    lines.extend(rows.iter().map(|&(link, title)| row(link, title)));
    lines.join("\n")
}

/// Renders a complete HTML page. Upstream `html*` fields are embedded as is;
/// only the locally built page title is escaped.
pub fn to_html(results: &[SearchResult], page_title: &str) -> String {
    let title = escape_html(page_title);
    let inner = results
        .iter()
        .map(|r| {
            format!(
                "    <div>\n      <h3>{}</h3>\n      <p>{}</p>\n      <a href=\"{}\">{}</a>\n    </div>\n",
                r.html_title, r.html_snippet, r.link, r.display_link
            )
        })
        .collect::<Vec<_>>()
        .join("    <hr>\n");

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <title>{title}</title>\n    <style>\n      body {{\n        font-family: sans-serif;\n      }}\n    </style>\n  </head>\n  <body>\n    <h1>{title}</h1>\n{inner}  </body>\n</html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
