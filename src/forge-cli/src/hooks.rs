//! Argument preprocessing for commands that need it before parsing.
//!
//! Each hook receives the argument vector (selector first) and may rewrite
//! it in place. A hook error aborts the invocation before any command runs.
//! When help for the command itself is requested, hooks do nothing and let
//! clap render it.
//!
//! - `scaffold`: resolves the template name to a directory and appends
//!   `--template-path <dir>`
//! - `init`: checks the project name is usable as a file name and appends
//!   `--name <name>` when it was derived from the target directory
//! - `exec`: checks the task exists in `Forge.toml` and inserts `--` after
//!   the task name so the task's own flags are forwarded verbatim

use std::path::{Path, PathBuf};

use forge_common::ProjectManifest;
use forge_common::dirs::project_state_dir;

use crate::argv::{self, SEPARATOR};
use crate::context::ProcessContext;
use crate::error::StructuredError;

/// Options of `scaffold` that take a value.
const SCAFFOLD_VALUE_FLAGS: &[&str] = &["--path", "-p", "--attribute", "-a", "--template-path"];

/// Options of `exec` that take a value.
const EXEC_VALUE_FLAGS: &[&str] = &["--path", "-p"];

const MAX_NAME_LEN: usize = 255;

pub fn preprocess_scaffold(args: &mut Vec<String>, ctx: &ProcessContext) -> anyhow::Result<()> {
    if argv::wants_help(args) || argv::flag_value(args, "--template-path", None).is_some() {
        return Ok(());
    }
    // A missing template name is reported by clap
    let Some((_, name)) = argv::positional(args, SCAFFOLD_VALUE_FLAGS) else {
        return Ok(());
    };
    let name = name.to_string();
    validate_file_name(&name, "template")?;

    let root = argv::project_root(args, ctx.cwd());
    let search_dirs = template_search_dirs(&root, ctx);
    let Some(template) = search_dirs
        .iter()
        .map(|dir| dir.join(&name))
        .find(|candidate| candidate.is_dir())
    else {
        let searched = search_dirs
            .iter()
            .map(|d| format!("  {}", d.display()))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(StructuredError::failure(format!(
            "Template '{name}' not found. Searched:\n{searched}"
        ))
        .into());
    };

    tracing::debug!("Resolved template '{}' to {}", name, template.display());
    argv::insert_before_separator(
        args,
        [
            "--template-path".to_string(),
            template.to_string_lossy().into_owned(),
        ],
    );
    Ok(())
}

pub fn preprocess_init(args: &mut Vec<String>, ctx: &ProcessContext) -> anyhow::Result<()> {
    if argv::wants_help(args) {
        return Ok(());
    }
    if let Some(name) = argv::flag_value(args, "--name", Some("-n")) {
        validate_file_name(name, "project")?;
        return Ok(());
    }

    let root = argv::project_root(args, ctx.cwd());
    let name = derive_project_name(&root)?;
    argv::insert_before_separator(args, ["--name".to_string(), name]);
    Ok(())
}

pub fn preprocess_exec(args: &mut Vec<String>, ctx: &ProcessContext) -> anyhow::Result<()> {
    // A missing task name is reported by clap
    let Some((index, task)) = argv::positional(args, EXEC_VALUE_FLAGS) else {
        return Ok(());
    };
    let task = task.to_string();

    // Only options before the task name belong to forge
    let forge_args = &args[..index];
    if argv::wants_help(forge_args) {
        return Ok(());
    }
    let root = argv::project_root(forge_args, ctx.cwd());
    let manifest =
        ProjectManifest::load(&root).map_err(|e| StructuredError::failure(e.to_string()))?;

    if manifest.task(&task).is_none() {
        let available = manifest.task_names();
        let message = if available.is_empty() {
            format!(
                "Task '{task}' not found. No tasks are defined in {}.",
                ProjectManifest::path_in(&root).display()
            )
        } else {
            format!(
                "Task '{task}' not found. Available tasks: {}",
                available.join(", ")
            )
        };
        return Err(StructuredError::failure(message).into());
    }

    if args.get(index + 1).map(String::as_str) != Some(SEPARATOR) {
        args.insert(index + 1, SEPARATOR.to_string());
    }
    Ok(())
}

/// Directories searched for `scaffold` templates, in priority order.
pub fn template_search_dirs(project_root: &Path, ctx: &ProcessContext) -> Vec<PathBuf> {
    let mut dirs = vec![project_state_dir(project_root).join("templates")];
    dirs.extend(
        ctx.config()
            .templates
            .paths
            .iter()
            .map(|p| argv::resolve_against(project_root, p)),
    );
    dirs.push(ctx.environment().dirs.templates_dir.clone());
    dirs
}

/// Project name derived from the directory the project is created in.
pub fn derive_project_name(root: &Path) -> Result<String, StructuredError> {
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StructuredError::failure(format!(
                "Cannot derive a project name from {}. Pass --name explicitly.",
                root.display()
            ))
        })?;
    validate_file_name(name, "project")?;
    Ok(name.to_string())
}

/// Check that `name` is safe to use as a single path component.
pub fn validate_file_name(name: &str, kind: &str) -> Result<(), StructuredError> {
    let problem = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." || name.starts_with('.') {
        Some("must not start with '.'")
    } else if name.len() > MAX_NAME_LEN {
        Some("is too long")
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        Some("may only contain letters, digits, '-', '_' and '.'")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(StructuredError::failure(format!(
            "The {kind} name '{name}' {problem}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context_in;
    use forge_common::MANIFEST_FILE_NAME;
    use pretty_assertions::assert_eq;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn structured(err: anyhow::Error) -> StructuredError {
        err.downcast::<StructuredError>().expect("structured error")
    }

    #[test]
    fn test_validate_file_name() {
        for ok in ["app", "my-app", "my_app.v2", "A1"] {
            assert!(validate_file_name(ok, "project").is_ok(), "{ok}");
        }
        for bad in ["", ".", "..", ".hidden", "a/b", "a\\b", "with space", "naïve"] {
            assert!(validate_file_name(bad, "project").is_err(), "{bad}");
        }
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_file_name(&long, "project").is_err());
    }

    #[test]
    fn test_scaffold_appends_project_template() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let template = tmp.path().join(".forge/templates/my-template");
        std::fs::create_dir_all(&template).unwrap();

        let mut args = strings(&["scaffold", "my-template"]);
        preprocess_scaffold(&mut args, &ctx).unwrap();

        assert_eq!(
            args,
            strings(&[
                "scaffold",
                "my-template",
                "--template-path",
                template.to_str().unwrap()
            ])
        );
    }

    #[test]
    fn test_scaffold_prefers_project_over_global() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let global = ctx.environment().dirs.templates_dir.join("lib");
        let local = tmp.path().join("app/.forge/templates/lib");
        std::fs::create_dir_all(&global).unwrap();
        std::fs::create_dir_all(&local).unwrap();

        let mut args = strings(&["scaffold", "--path", "app", "lib"]);
        preprocess_scaffold(&mut args, &ctx).unwrap();
        assert_eq!(args.last().unwrap(), local.to_str().unwrap());

        let mut args = strings(&["scaffold", "lib"]);
        preprocess_scaffold(&mut args, &ctx).unwrap();
        assert_eq!(args.last().unwrap(), global.to_str().unwrap());
    }

    #[test]
    fn test_scaffold_missing_template_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["scaffold", "nope"]);
        let err = structured(preprocess_scaffold(&mut args, &ctx).unwrap_err());
        assert_ne!(err.exit_code(), 0);
        assert!(err.message().contains("Template 'nope' not found"));
        assert_eq!(args, strings(&["scaffold", "nope"]));
    }

    #[test]
    fn test_scaffold_keeps_explicit_template_path() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["scaffold", "x", "--template-path", "/tmp/x"]);
        preprocess_scaffold(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["scaffold", "x", "--template-path", "/tmp/x"]));
    }

    #[test]
    fn test_init_derives_name_from_path() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["init", "--path", "my-app"]);
        preprocess_init(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["init", "--path", "my-app", "--name", "my-app"]));
    }

    #[test]
    fn test_init_rejects_unsafe_name() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["init", "--name", "../escape"]);
        let err = structured(preprocess_init(&mut args, &ctx).unwrap_err());
        assert!(err.message().contains("'../escape'"));
    }

    #[test]
    fn test_exec_inserts_separator_after_task() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[tasks]\nlint = \"true\"\n",
        )
        .unwrap();

        let mut args = strings(&["exec", "lint", "--fix", "--path", "x"]);
        preprocess_exec(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["exec", "lint", "--", "--fix", "--path", "x"]));

        // Already separated
        let mut args = strings(&["exec", "lint", "--", "--fix"]);
        preprocess_exec(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["exec", "lint", "--", "--fix"]));
    }

    #[test]
    fn test_exec_forwards_task_help() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[tasks]\nlint = \"true\"\n",
        )
        .unwrap();

        let mut args = strings(&["exec", "lint", "--help"]);
        preprocess_exec(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["exec", "lint", "--", "--help"]));

        let mut args = strings(&["exec", "-p", ".", "lint", "-h"]);
        preprocess_exec(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["exec", "-p", ".", "lint", "--", "-h"]));
    }

    #[test]
    fn test_exec_help_for_forge_leaves_args() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["exec", "--help", "lint"]);
        preprocess_exec(&mut args, &ctx).unwrap();
        assert_eq!(args, strings(&["exec", "--help", "lint"]));
    }

    #[test]
    fn test_exec_unknown_task_lists_available() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[tasks]\nlint = \"true\"\nfmt = \"true\"\n",
        )
        .unwrap();

        let mut args = strings(&["exec", "deploy"]);
        let err = structured(preprocess_exec(&mut args, &ctx).unwrap_err());
        assert_eq!(err.message(), "Task 'deploy' not found. Available tasks: fmt, lint");
    }

    #[test]
    fn test_exec_without_manifest_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());

        let mut args = strings(&["exec", "lint"]);
        let err = structured(preprocess_exec(&mut args, &ctx).unwrap_err());
        assert!(err.message().contains("forge init"));
    }
}
