//! Proxy configuration
//!
//! Priority per setting: CLI flag → ENV → TOML → compiled default.

use seedmix_common::config::{env_override, load_toml_config, resolve_config_path};
use seedmix_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PORT: u16 = 3000;

/// Proxy settings (`~/.config/seedmix/proxy.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listen address for the HTTP server
    pub bind_addr: SocketAddr,
    /// OpenAI-compatible API root; `/chat/completions` is appended
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Bearer token; `OPENAI_API_KEY` takes precedence
    pub api_key: Option<String>,
    /// Timeout for one completion request
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            api_key: None,
            request_timeout_secs: 60,
        }
    }
}

impl ProxyConfig {
    /// Resolve, load and validate the proxy configuration
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(cli_path, "SEEDMIX_PROXY_CONFIG", "proxy");
        let mut config: ProxyConfig = load_toml_config(path.as_deref())?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(key) = env_override("OPENAI_API_KEY") {
            info!("API key loaded from environment variable");
            self.api_key = Some(key);
        }
        if let Some(port) = env_override("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", port)))?;
            self.bind_addr.set_port(port);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.openai_base_url.trim().is_empty() {
            return Err(Error::Config("openai_base_url cannot be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Key prefix safe for logging
    pub fn api_key_prefix(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(|k| k.chars().take(10).collect())
    }
}
