//! Application directories for Forge CLI.
//!
//! Defaults to `~/.forge` on every platform. Can be overridden with the
//! `FORGE_HOME` environment variable.

use std::path::{Path, PathBuf};

/// Primary home directory name.
pub const HOME_DIR_NAME: &str = ".forge";

/// Environment variable overriding the home directory.
pub const FORGE_HOME_ENV: &str = "FORGE_HOME";

/// Application directories structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Root directory (`~/.forge` or `$FORGE_HOME`)
    pub home: PathBuf,
    /// Cache directory (`<home>/cache`)
    pub cache_dir: PathBuf,
    /// Global templates (`<home>/templates`)
    pub templates_dir: PathBuf,
    /// Analytics spool and installation id (`<home>/analytics`)
    pub analytics_dir: PathBuf,
}

impl AppDirs {
    /// Resolve directories, respecting `FORGE_HOME`.
    ///
    /// A relative `FORGE_HOME` is resolved against the current directory so
    /// state never lands somewhere that depends on where forge was invoked
    /// later on.
    pub fn new() -> Option<Self> {
        if let Ok(home) = std::env::var(FORGE_HOME_ENV)
            && !home.trim().is_empty()
        {
            let home = PathBuf::from(home);
            let home = if home.is_relative() {
                std::env::current_dir().ok()?.join(home)
            } else {
                home
            };
            return Some(Self::at(home));
        }

        let home_dir = dirs::home_dir()?;
        Some(Self::at(home_dir.join(HOME_DIR_NAME)))
    }

    /// Build the directory layout below an explicit root.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            cache_dir: home.join("cache"),
            templates_dir: home.join("templates"),
            analytics_dir: home.join("analytics"),
            home,
        }
    }

    /// Create every directory that does not exist yet.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        for dir in [
            &self.home,
            &self.cache_dir,
            &self.templates_dir,
            &self.analytics_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Path of the global configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }
}

/// Get the forge home directory, if one can be determined.
pub fn get_forge_home() -> Option<PathBuf> {
    AppDirs::new().map(|d| d.home)
}

/// Per-project state directory for a project rooted at `root`.
pub fn project_state_dir(root: &Path) -> PathBuf {
    root.join(crate::PROJECT_DIR_NAME)
}
