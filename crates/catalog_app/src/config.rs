//! Application configuration.
//!
//! Values come from an optional RON file, then command-line flags and their
//! environment fallbacks override individual fields.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use catalog_engine::{FetchSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "catalog.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub quiet_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_concurrent_lookups: usize,
    /// Empty genre-filtered pages fetched in a row without a sentinel signal.
    pub scan_ahead_pages: u32,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            quiet_ms: catalog_core::DEFAULT_QUIET_PERIOD.as_millis() as u64,
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_concurrent_lookups: fetch.max_concurrent_lookups,
            scan_ahead_pages: catalog_core::DEFAULT_SCAN_AHEAD_LIMIT,
            state_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or the default file in the working directory when `path`
    /// is `None`. Only an explicitly named file is required to exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_ms)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_concurrent_lookups: self.max_concurrent_lookups,
        }
    }
}
