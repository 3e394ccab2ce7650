//! Clean command.
//!
//! Removes the project's cached state (`.forge/cache`) and, with `--global`,
//! the global cache under the forge home directory. Templates, config and
//! analytics state are never touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use forge_common::dirs::project_state_dir;

use crate::context::ProcessContext;

/// Remove cached state.
#[derive(Debug, Parser)]
pub struct CleanCli {
    /// Project directory (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Also clear the global cache
    #[arg(long)]
    pub global: bool,
}

impl CleanCli {
    pub async fn run(&self, ctx: &ProcessContext) -> Result<()> {
        let root = ctx.project_root(self.path.as_deref());
        let mut targets = vec![project_state_dir(&root).join("cache")];
        if self.global {
            targets.push(ctx.environment().dirs.cache_dir.clone());
        }

        let mut removed = 0;
        for target in &targets {
            if remove_dir(target).await? {
                tracing::info!("Removed {}", target.display());
                removed += 1;
            }
        }
        if removed == 0 {
            tracing::info!("Nothing to clean");
        }
        Ok(())
    }
}

/// Remove `dir` if it exists. Returns whether anything was removed.
async fn remove_dir(dir: &Path) -> Result<bool> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context_in;

    #[tokio::test]
    async fn test_clean_removes_project_cache_only() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let cache = tmp.path().join(".forge/cache");
        let templates = tmp.path().join(".forge/templates");
        std::fs::create_dir_all(cache.join("nested")).unwrap();
        std::fs::create_dir_all(&templates).unwrap();
        let global = ctx.environment().dirs.cache_dir.clone();
        std::fs::create_dir_all(&global).unwrap();

        let cli = CleanCli {
            path: None,
            global: false,
        };
        cli.run(&ctx).await.unwrap();

        assert!(!cache.exists());
        assert!(templates.exists());
        assert!(global.exists());
    }

    #[tokio::test]
    async fn test_clean_global() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let global = ctx.environment().dirs.cache_dir.clone();
        std::fs::create_dir_all(global.join("x")).unwrap();

        let cli = CleanCli {
            path: Some(PathBuf::from("elsewhere")),
            global: true,
        };
        cli.run(&ctx).await.unwrap();
        assert!(!global.exists());
    }

    #[tokio::test]
    async fn test_clean_with_nothing_to_do() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let cli = CleanCli {
            path: None,
            global: false,
        };
        assert!(cli.run(&ctx).await.is_ok());
    }
}
