//! Process environment established once at startup.
//!
//! [`Environment::bootstrap`] resolves and creates the application
//! directories and snapshots the environment variables the CLI cares about.
//! The result is read-only for the rest of the process.

use std::path::PathBuf;

use thiserror::Error;

use crate::dirs::AppDirs;

/// Opt-out switch for usage analytics.
pub const STATS_OPT_OUT_ENV: &str = "FORGE_STATS_OPT_OUT";

/// Set for child processes when `--verbose` was passed.
pub const VERBOSE_ENV: &str = "FORGE_VERBOSE";

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Could not determine the forge home directory. Set FORGE_HOME to a writable directory.")]
    NoHome,

    #[error("Cannot create forge directories in {path}: {source}")]
    CreateDirs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Read-only process environment.
#[derive(Debug, Clone)]
pub struct Environment {
    /// `--verbose` was passed on the command line
    pub verbose: bool,
    /// Analytics were switched off via `FORGE_STATS_OPT_OUT`
    pub stats_opt_out: bool,
    /// Running on a CI provider
    pub is_ci: bool,
    /// Directory forge was invoked from
    pub cwd: PathBuf,
    /// Application directories
    pub dirs: AppDirs,
}

impl Environment {
    /// Resolve directories, create them and snapshot environment flags.
    pub fn bootstrap(verbose: bool) -> Result<Self, EnvironmentError> {
        let dirs = AppDirs::new().ok_or(EnvironmentError::NoHome)?;
        dirs.ensure_exists()
            .map_err(|source| EnvironmentError::CreateDirs {
                path: dirs.home.clone(),
                source,
            })?;
        let cwd = std::env::current_dir().map_err(EnvironmentError::CurrentDir)?;

        Ok(Self {
            verbose,
            stats_opt_out: env_flag(STATS_OPT_OUT_ENV),
            is_ci: env_flag("CI"),
            cwd,
            dirs,
        })
    }

    /// Environment rooted at explicit paths, for tests and embedding.
    pub fn with_dirs(cwd: impl Into<PathBuf>, dirs: AppDirs) -> Self {
        Self {
            verbose: false,
            stats_opt_out: false,
            is_ci: false,
            cwd: cwd.into(),
            dirs,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| is_truthy(&v)).unwrap_or(false)
}

/// Interpret an environment variable value as a boolean switch.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
