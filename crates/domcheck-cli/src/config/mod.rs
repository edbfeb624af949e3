//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "DOMCHECK_CONFIG";

/// Checks in flight at once when nothing else is configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Resolver name (`google`, `cloudflare`) or DoH URL.
    pub resolver: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Per-request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,

    /// Number of domains checked at once.
    pub concurrency: Option<usize>,

    /// Always show explanations (as if --explain was passed).
    #[serde(default)]
    pub explain_by_default: bool,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "domcheck", "domcheck")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Concurrency to use when neither the command line nor the file sets one.
    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            resolver: Some("cloudflare".into()),
            output_format: Some(OutputFormat::Json),
            timeout_secs: Some(10),
            concurrency: Some(4),
            explain_by_default: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("output_format = \"json\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn concurrency_is_at_least_one() {
        let config = Config {
            concurrency: Some(0),
            ..Config::default()
        };
        assert_eq!(config.concurrency_or_default(), 1);
        assert_eq!(Config::default().concurrency_or_default(), DEFAULT_CONCURRENCY);
    }
}
