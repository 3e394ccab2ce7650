//! Project manifest (`Forge.toml`).
//!
//! The manifest names the project and maps script and task names to shell
//! command lines. Built-in commands read it; the dispatch layer never does.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the project manifest.
pub const MANIFEST_FILE_NAME: &str = "Forge.toml";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No {MANIFEST_FILE_NAME} found in {0}. Run 'forge init' to create one.")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// `[project]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
}

/// Parsed `Forge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub project: ProjectSection,

    /// Scripts run by `build`, `generate` and `test`
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,

    /// Tasks run by `exec <task>`
    #[serde(default)]
    pub tasks: BTreeMap<String, String>,
}

impl ProjectManifest {
    /// Manifest with the scripts `forge init` writes by default.
    pub fn new(name: impl Into<String>) -> Self {
        let scripts = [
            ("build", "echo \"No build script configured\""),
            ("generate", "echo \"No generate script configured\""),
            ("test", "echo \"No test script configured\""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            project: ProjectSection { name: name.into() },
            scripts,
            tasks: BTreeMap::new(),
        }
    }

    /// Path of the manifest for a project rooted at `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE_NAME)
    }

    /// Load the manifest of the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ManifestError> {
        let path = Self::path_in(root);
        if !path.is_file() {
            return Err(ManifestError::NotFound(root.to_path_buf()));
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ManifestError::Parse { path, source })
    }

    /// Render the manifest as TOML.
    pub fn to_toml(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    pub fn task(&self, name: &str) -> Option<&str> {
        self.tasks.get(name).map(String::as_str)
    }

    /// Task names in sorted order.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }
}
