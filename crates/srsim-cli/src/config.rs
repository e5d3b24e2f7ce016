//! CLI configuration types

use anyhow::Context;
use serde::{Deserialize, Serialize};
use srsim_economics::NetworkParams;
use std::path::{Path, PathBuf};

/// Complete CLI configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Network parameters
    #[serde(default)]
    pub network: NetworkParams,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Where the config came from, reported once logging is up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults(PathBuf),
}

impl CliConfig {
    /// Parse and validate a TOML config
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.network.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> anyhow::Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        Ok((config, ConfigSource::File(path.to_path_buf())))
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
