//! TOML configuration for the `codex` binary.
//!
//! Every section is optional; missing values fall back to defaults.

use anyhow::{Context, Result};
use codex_core::SuggestConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./codex.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub db: DbConfig,
    pub logging: LoggingConfig,
    pub suggest: SuggestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("codex.db"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Defaults to the build-mode level when unset.
    pub level: Option<String>,
    /// File logging is disabled when unset.
    pub dir: Option<PathBuf>,
}

/// Loads configuration.
///
/// An explicit path must exist. Without one, `./codex.toml` is read when
/// present and defaults are used otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
    config
        .suggest
        .validate()
        .context("Invalid [suggest] section")?;
    Ok(config)
}
