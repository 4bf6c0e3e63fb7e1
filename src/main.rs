//! kessler-search CLI - search the web from the command line.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use kessler_search::{
    render::page_title, viewer, SearchClient, SearchRequest, SettingsSources,
};

/// kessler-search - a search cli tool
#[derive(Parser)]
#[command(name = "kessler-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search query; read from stdin when omitted
    query: Option<String>,

    /// Search engine (only "google" is supported)
    #[arg(long)]
    engine: Option<String>,

    /// Google custom search API key
    #[arg(long, alias = "apiKey")]
    api_key: Option<String>,

    /// Custom search engine identifier
    #[arg(long)]
    cx: Option<String>,

    /// Maximum number of results (1-100)
    #[arg(long, alias = "maxResults")]
    max_results: Option<u32>,

    /// Output type: json, table, table-text, html, html-browser, links,
    /// links-context, links-text, links-text-context
    #[arg(short, long, alias = "outputType")]
    output_type: Option<String>,

    /// Additional config file (may be repeated)
    #[arg(long)]
    config: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let sources = SettingsSources::standard(cli.config.clone());
    run(cli, sources).await
}

async fn run(cli: Cli, sources: SettingsSources) -> Result<()> {
    let mut settings = sources.load()?;
    if let Some(engine) = cli.engine {
        settings.engine = engine;
    }
    if let Some(output_type) = cli.output_type {
        settings.output_type = output_type;
    }
    if let Some(max_results) = cli.max_results {
        settings.max_results = max_results;
    }
    if cli.api_key.is_some() {
        settings.api_key = cli.api_key;
    }
    if cli.cx.is_some() {
        settings.cx = cli.cx;
    }

    // Everything the caller can get wrong is checked before any I/O.
    let engine = settings.engine_kind()?;
    let output = settings.output_kind()?;

    let query = match cli.query {
        Some(query) => query,
        None => read_stdin().await?,
    };
    let request = SearchRequest::new(query.trim()).with_max_results(settings.max_results);
    request.validate()?;

    let client = SearchClient::for_engine(engine, settings.google_config()?)?;
    let results = client.search(&request).await?;

    let title = page_title(engine.as_str(), &request.query, results.len());
    let rendered = output.render(&results, &title)?;

    if output.opens_browser() {
        let path = viewer::open_html(&rendered)?;
        tracing::debug!("Results written to {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
    }

    Ok(())
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}
