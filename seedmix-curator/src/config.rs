//! Configuration resolution for the curator
//!
//! Priority per setting: CLI flag → ENV → TOML → compiled default.
//! CLI flags are applied by `main`; this module covers the rest.

use seedmix_common::config::{env_override, load_toml_config, resolve_config_path};
use seedmix_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on catalog results per search
pub const MAX_SEARCH_LIMIT: usize = 8;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://itunes.apple.com";
pub const DEFAULT_GENERATION_URL: &str = "http://localhost:3000/ai";

/// Curator settings (`~/.config/seedmix/curator.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Catalog search API root; `/search` is appended
    pub catalog_base_url: String,
    /// Full URL of the generation endpoint
    pub generation_url: String,
    /// Results per catalog search, capped at 8
    pub search_limit: usize,
    /// Per-request timeout for both endpoints
    pub request_timeout_secs: u64,
    /// Max simultaneous enrichment lookups; unset means all at once
    pub enrichment_concurrency: Option<usize>,
    /// Quiet period before a search-as-you-type query fires
    pub debounce_ms: u64,
    /// Track count requested when none is given
    pub default_how_many: u32,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            generation_url: DEFAULT_GENERATION_URL.to_string(),
            search_limit: MAX_SEARCH_LIMIT,
            request_timeout_secs: 30,
            enrichment_concurrency: None,
            debounce_ms: crate::session::DEFAULT_DEBOUNCE_MS,
            default_how_many: seedmix_common::model::DEFAULT_HOW_MANY,
        }
    }
}

impl CuratorConfig {
    /// Resolve, load and validate the curator configuration
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(cli_path, "SEEDMIX_CURATOR_CONFIG", "curator");
        let mut config: CuratorConfig = load_toml_config(path.as_deref())?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(url) = env_override("SEEDMIX_CATALOG_URL") {
            info!("Catalog URL loaded from environment variable");
            self.catalog_base_url = url;
        }
        if let Some(url) = env_override("SEEDMIX_GENERATION_URL") {
            info!("Generation URL loaded from environment variable");
            self.generation_url = url;
        }
    }

    /// Reject unusable values, clamp the search limit
    pub fn validate(&mut self) -> Result<()> {
        if self.search_limit == 0 {
            return Err(Error::Config("search_limit must be at least 1".to_string()));
        }
        if self.search_limit > MAX_SEARCH_LIMIT {
            warn!(
                "search_limit {} exceeds {}, clamping",
                self.search_limit, MAX_SEARCH_LIMIT
            );
            self.search_limit = MAX_SEARCH_LIMIT;
        }
        if self.enrichment_concurrency == Some(0) {
            return Err(Error::Config(
                "enrichment_concurrency must be at least 1 (omit it for no cap)".to_string(),
            ));
        }
        if self.default_how_many == 0 {
            return Err(Error::Config("default_how_many must be at least 1".to_string()));
        }
        if self.catalog_base_url.trim().is_empty() || self.generation_url.trim().is_empty() {
            return Err(Error::Config("endpoint URLs cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
