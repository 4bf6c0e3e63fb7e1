//! Layered user settings.
//!
//! Sources are merged in increasing priority: built-in defaults, the user
//! config file, `./.kessler-search.toml`, files passed with `--config`, then
//! `KESSLER_SEARCH_*` environment variables. Command line flags are applied on
//! top by the binary.

use std::env;
use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::engines::{GoogleConfig, DEFAULT_BASE_URL};
use crate::query::DEFAULT_MAX_RESULTS;
use crate::{EngineKind, OutputKind, Result, SearchError};

const QUALIFIER: &str = "";
const ORGANIZATION: &str = "";
const APPLICATION: &str = "kessler-search";

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "KESSLER_SEARCH";

/// Resolved settings. Engine and output names stay strings until used so that
/// bad values surface as the matching [`SearchError`] variant.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API key passed through to the engine.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Custom search engine identifier.
    #[serde(default)]
    pub cx: Option<String>,
    /// Engine name.
    pub engine: String,
    /// Output kind name.
    pub output_type: String,
    /// Default number of results.
    pub max_results: u32,
    /// HTTP timeout in seconds.
    pub timeout: u64,
    /// API root.
    pub base_url: String,
}

impl Settings {
    /// Parses the configured engine.
    pub fn engine_kind(&self) -> Result<EngineKind> {
        self.engine.parse()
    }

    /// Parses the configured output kind.
    pub fn output_kind(&self) -> Result<OutputKind> {
        self.output_type.parse()
    }

    /// Builds engine connection settings. Credentials are required.
    pub fn google_config(&self) -> Result<GoogleConfig> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            SearchError::InvalidArgument("missing API key (--api-key or api_key setting)".into())
        })?;
        let cx = self.cx.clone().ok_or_else(|| {
            SearchError::InvalidArgument("missing search engine id (--cx or cx setting)".into())
        })?;
        Ok(GoogleConfig::new(api_key, cx)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout))
    }
}

/// Where settings are read from.
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    /// Optional files, silently skipped when missing.
    pub default_files: Vec<PathBuf>,
    /// Required files.
    pub extra_files: Vec<PathBuf>,
    /// Environment variable prefix, if the environment should be read.
    pub env_prefix: Option<String>,
}

impl SettingsSources {
    /// The standard locations plus the given required files.
    pub fn standard(extra_files: Vec<PathBuf>) -> Self {
        Self {
            default_files: default_config_files(),
            extra_files,
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Merges all sources into [`Settings`].
    pub fn load(&self) -> Result<Settings> {
        let mut builder = Config::builder()
            .set_default("engine", EngineKind::default().as_str())?
            .set_default("output_type", OutputKind::default().as_str())?
            .set_default("max_results", i64::from(DEFAULT_MAX_RESULTS))?
            .set_default("timeout", 10)?
            .set_default("base_url", DEFAULT_BASE_URL)?;

        for path in &self.default_files {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }
        for path in &self.extra_files {
            builder = builder.add_source(File::from(path.clone()).required(true));
        }
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

/// Default config file locations, lowest priority first.
pub fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Some(dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        files.push(dirs.config_dir().join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".kessler-search.toml"));
    }

    files
}
