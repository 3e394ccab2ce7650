//! Init command.
//!
//! Creates a project: `Forge.toml` with placeholder scripts, the
//! `.forge/templates` directory for project templates and a `.gitignore`
//! keeping the project cache out of version control.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use forge_common::ProjectManifest;
use forge_common::dirs::project_state_dir;

use crate::context::ProcessContext;
use crate::error::StructuredError;
use crate::hooks::derive_project_name;

const STATE_GITIGNORE: &str = "cache/\n";

/// Create a new forge project.
#[derive(Debug, Parser)]
pub struct InitCli {
    /// Directory to create the project in (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Project name (defaults to the directory name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Overwrite an existing Forge.toml
    #[arg(long, short = 'f')]
    pub force: bool,
}

impl InitCli {
    pub async fn run(&self, ctx: &ProcessContext) -> Result<()> {
        let root = ctx.project_root(self.path.as_deref());
        let name = match &self.name {
            Some(name) => name.clone(),
            None => derive_project_name(&root)?,
        };

        let manifest_path = ProjectManifest::path_in(&root);
        if manifest_path.exists() && !self.force {
            return Err(StructuredError::failure(format!(
                "{} already exists. Use --force to overwrite it.",
                manifest_path.display()
            ))
            .into());
        }

        let state_dir = project_state_dir(&root);
        tokio::fs::create_dir_all(state_dir.join("templates"))
            .await
            .with_context(|| format!("Failed to create {}", state_dir.display()))?;

        let manifest = ProjectManifest::new(&name).to_toml()?;
        tokio::fs::write(&manifest_path, manifest)
            .await
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        let gitignore = state_dir.join(".gitignore");
        if !gitignore.exists() {
            tokio::fs::write(&gitignore, STATE_GITIGNORE)
                .await
                .with_context(|| format!("Failed to write {}", gitignore.display()))?;
        }

        tracing::info!("Initialized project '{}' in {}", name, root.display());
        Ok(())
    }
}
