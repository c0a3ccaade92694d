//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb endpoint settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDb endpoint configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// Base URL override (default: `http://www.omdbapi.com/`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key sent as the `apikey` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

impl OmdbConfig {
    /// Parses the configured base URL, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is set but is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid omdb.base_url: {raw}")))
            .transpose()
    }
}
