//! Forge configuration (`config.toml`).
//!
//! A project-level `<project>/.forge/config.toml` takes precedence over the
//! global `<FORGE_HOME>/config.toml`. The first file found wins; files are
//! not merged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dirs::{AppDirs, project_state_dir};
use crate::timeout::DEFAULT_ANALYTICS_TIMEOUT_MS;

/// Environment variable overriding `analytics.endpoint`.
pub const ANALYTICS_ENDPOINT_ENV: &str = "FORGE_ANALYTICS_ENDPOINT";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Usage analytics settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Collect anonymous usage analytics
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Collector URL. Events are spooled locally when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: None,
            timeout_ms: DEFAULT_ANALYTICS_TIMEOUT_MS,
        }
    }
}

/// Template lookup settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    /// Extra directories searched for `scaffold` templates
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub analytics: AnalyticsSettings,

    #[serde(default)]
    pub templates: TemplateSettings,

    /// File this configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    DEFAULT_ANALYTICS_TIMEOUT_MS
}

impl ForgeConfig {
    /// Load the configuration that applies to `project_root`.
    ///
    /// Returns the defaults when neither the project nor the global file exist.
    pub fn load(project_root: &Path, dirs: &AppDirs) -> Result<Self, ConfigError> {
        let candidates = [
            project_state_dir(project_root).join("config.toml"),
            dirs.config_file(),
        ];

        let mut config = match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a single configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ForgeConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var(ANALYTICS_ENDPOINT_ENV)
            && !endpoint.trim().is_empty()
        {
            self.analytics.endpoint = Some(endpoint);
        }
    }
}
