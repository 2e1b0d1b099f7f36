//! Configuration file resolution and loading
//!
//! Each binary owns its own config struct; this module finds and parses the
//! TOML file backing it. Resolution order for the file path:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. `~/.config/seedmix/<module>.toml` if it exists
//!
//! Individual settings are then overridden by environment variables and CLI
//! flags in the owning binary.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve the config file for `module`
///
/// Returns `None` when no file was requested and the default file does not
/// exist; callers then run on compiled defaults.
pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    module: &str,
) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user default location
    default_config_path(module).filter(|path| path.exists())
}

/// `~/.config/seedmix/<module>.toml` (platform config dir)
pub fn default_config_path(module: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seedmix").join(format!("{}.toml", module)))
}

/// Load a TOML config file, falling back to `T::default()` when `path` is None
///
/// An explicitly resolved path that cannot be read or parsed is an error.
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        debug!("No config file found, using defaults");
        return Ok(T::default());
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Read an environment variable, treating empty/whitespace values as unset
pub fn env_override(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
