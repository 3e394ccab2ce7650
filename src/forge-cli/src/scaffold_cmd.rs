//! Scaffold command.
//!
//! Copies a template directory into the project, substituting `{{key}}`
//! placeholders in file contents and relative paths. The template directory
//! is resolved by the `scaffold` preprocess hook and arrives as
//! `--template-path`.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use walkdir::WalkDir;

use crate::context::ProcessContext;
use crate::error::StructuredError;

/// Create files from a template.
#[derive(Debug, Parser)]
pub struct ScaffoldCli {
    /// Template name
    pub template: String,

    /// Destination directory (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Template attribute as key=value, replaces {{key}} (repeatable)
    #[arg(long = "attribute", short = 'a', value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// Overwrite existing files
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Resolved template directory
    #[arg(long, hide = true)]
    pub template_path: Option<PathBuf>,
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid attribute '{s}', expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid attribute '{s}', the key is empty"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// One entry of the template, mapped to its destination.
#[derive(Debug)]
struct PlannedEntry {
    source: PathBuf,
    dest: PathBuf,
    is_dir: bool,
}

impl ScaffoldCli {
    pub async fn run(&self, ctx: &ProcessContext) -> Result<()> {
        let template_dir = self.template_path.as_deref().ok_or_else(|| {
            StructuredError::failure(format!("Template '{}' not found", self.template))
        })?;
        let root = ctx.project_root(self.path.as_deref());
        let attributes = self.attributes();

        let plan = plan(template_dir, &root, &attributes)?;
        if !self.force {
            let conflicts: Vec<String> = plan
                .iter()
                .filter(|e| !e.is_dir && e.dest.exists())
                .map(|e| format!("  {}", e.dest.display()))
                .collect();
            if !conflicts.is_empty() {
                return Err(StructuredError::failure(format!(
                    "Refusing to overwrite existing files (use --force):\n{}",
                    conflicts.join("\n")
                ))
                .into());
            }
        }

        let mut written = 0;
        for entry in &plan {
            if entry.is_dir {
                tokio::fs::create_dir_all(&entry.dest)
                    .await
                    .with_context(|| format!("Failed to create {}", entry.dest.display()))?;
                continue;
            }
            if let Some(parent) = entry.dest.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let bytes = tokio::fs::read(&entry.source)
                .await
                .with_context(|| format!("Failed to read {}", entry.source.display()))?;
            let content = match String::from_utf8(bytes) {
                Ok(text) => render(&text, &attributes).into_bytes(),
                // Binary files are copied as-is
                Err(e) => e.into_bytes(),
            };
            tokio::fs::write(&entry.dest, content)
                .await
                .with_context(|| format!("Failed to write {}", entry.dest.display()))?;
            tracing::debug!("Wrote {}", entry.dest.display());
            written += 1;
        }

        tracing::info!(
            "Created {} file(s) from template '{}' in {}",
            written,
            self.template,
            root.display()
        );
        Ok(())
    }

    /// Attributes with `name` defaulting to the template name.
    fn attributes(&self) -> BTreeMap<String, String> {
        let mut attributes: BTreeMap<String, String> = self.attributes.iter().cloned().collect();
        attributes
            .entry("name".to_string())
            .or_insert_with(|| self.template.clone());
        attributes
    }
}

/// Replace every `{{key}}` in `text`.
pub fn render(text: &str, attributes: &BTreeMap<String, String>) -> String {
    attributes.iter().fold(text.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{key}}}}}"), value)
    })
}

fn plan(
    template_dir: &Path,
    root: &Path,
    attributes: &BTreeMap<String, String>,
) -> Result<Vec<PlannedEntry>> {
    if !template_dir.is_dir() {
        return Err(StructuredError::failure(format!(
            "Template directory {} does not exist",
            template_dir.display()
        ))
        .into());
    }

    let mut plan = Vec::new();
    for entry in WalkDir::new(template_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", template_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
        let rendered = PathBuf::from(render(&relative.to_string_lossy(), attributes));
        if !stays_inside(&rendered) {
            return Err(StructuredError::failure(format!(
                "Template path '{}' renders to '{}', which leaves the destination",
                relative.display(),
                rendered.display()
            ))
            .into());
        }
        plan.push(PlannedEntry {
            source: entry.path().to_path_buf(),
            dest: root.join(rendered),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(plan)
}

fn stays_inside(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
