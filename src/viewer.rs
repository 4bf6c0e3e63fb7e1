//! Hands a rendered HTML document to the system browser.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{Result, SearchError};

/// Writes `html` to a persistent temporary `.html` file and returns its path.
///
/// The file is kept on disk so the browser can still read it after this
/// process exits.
pub fn write_html_file(html: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("kessler-search-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(html.as_bytes())?;
    file.flush()?;
    let (_, path) = file.keep().map_err(|e| SearchError::Io(e.error))?;
    Ok(path)
}

/// Writes `html` to disk and opens it with the platform's default handler.
pub fn open_html(html: &str) -> Result<PathBuf> {
    let path = write_html_file(html)?;
    debug!("Opening {} in browser", path.display());

    let status = opener_command(&path).status()?;
    if !status.success() {
        return Err(SearchError::Io(std::io::Error::other(format!(
            "browser launcher exited with {}",
            status
        ))));
    }
    Ok(path)
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
