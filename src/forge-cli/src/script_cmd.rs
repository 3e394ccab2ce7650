//! Script commands (`build`, `generate`, `test`).
//!
//! Each runs the matching `[scripts]` entry of `Forge.toml` through the
//! platform shell, with any arguments after `--` shell-quoted and appended.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, Result};
use clap::Parser;
use forge_common::ProjectManifest;
use forge_common::environment::VERBOSE_ENV;

use crate::context::ProcessContext;
use crate::error::StructuredError;
use crate::external::exit_code_of;

/// Which script a [`ScriptCli`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Build,
    Generate,
    Test,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::Build => "build",
            ScriptKind::Generate => "generate",
            ScriptKind::Test => "test",
        }
    }
}

/// Arguments shared by the script commands.
#[derive(Debug, Parser)]
pub struct ScriptCli {
    /// Project directory (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Extra arguments passed to the script
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl ScriptCli {
    pub async fn run(&self, kind: ScriptKind, ctx: &ProcessContext) -> Result<()> {
        let root = ctx.project_root(self.path.as_deref());
        let manifest =
            ProjectManifest::load(&root).map_err(|e| StructuredError::failure(e.to_string()))?;
        let line = manifest.script(kind.as_str()).ok_or_else(|| {
            StructuredError::failure(format!(
                "No '{}' script defined in {}",
                kind.as_str(),
                ProjectManifest::path_in(&root).display()
            ))
        })?;

        let code = run_shell(line, &self.args, &root, ctx.verbose()).await?;
        check_exit("Script", kind.as_str(), code)
    }
}

/// Turn a shell exit code into the command's result.
pub(crate) fn check_exit(kind: &str, name: &str, code: i32) -> Result<()> {
    if code == 0 {
        return Ok(());
    }
    let message = format!("{kind} '{name}' failed with exit code {code}");
    Err(StructuredError::new(code, message).into())
}

/// Shell line with `extra_args` quoted and appended.
pub fn command_line(line: &str, extra_args: &[String]) -> Result<String> {
    if extra_args.is_empty() {
        return Ok(line.to_string());
    }
    let quoted = shlex::try_join(extra_args.iter().map(String::as_str))
        .context("Arguments cannot be passed to the shell")?;
    Ok(format!("{line} {quoted}"))
}

/// Run `line` through the platform shell in `cwd` with inherited stdio.
pub async fn run_shell(
    line: &str,
    extra_args: &[String],
    cwd: &Path,
    verbose: bool,
) -> Result<i32> {
    let full = command_line(line, extra_args)?;
    tracing::debug!("Running `{}` in {}", full, cwd.display());

    let mut command = if cfg!(windows) {
        let mut c = tokio::process::Command::new("cmd");
        c.arg("/C").arg(&full);
        c
    } else {
        let mut c = tokio::process::Command::new("sh");
        c.arg("-c").arg(&full);
        c
    };
    command
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if verbose {
        command.env(VERBOSE_ENV, "true");
    }

    let status = command
        .status()
        .await
        .with_context(|| format!("Failed to run `{full}`"))?;
    Ok(exit_code_of(status))
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

    #[test]
    fn test_command_line_quotes_extra_args() {
        assert_eq!(command_line("make", &[]).unwrap(), "make");
        assert_eq!(
            command_line("pytest", &strings(&["-k", "slow tests"])).unwrap(),
            "pytest -k 'slow tests'"
        );
    }

    #[test]
    fn test_check_exit() {
        assert!(check_exit("Script", "build", 0).is_ok());
        let err = check_exit("Script", "build", 7).unwrap_err();
        let err = err.downcast::<StructuredError>().unwrap();
        assert_eq!(err.exit_code(), 7);
        assert_eq!(err.message(), "Script 'build' failed with exit code 7");
    }

    #[tokio::test]
    async fn test_missing_manifest_is_structured_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let cli = ScriptCli {
            path: None,
            args: Vec::new(),
        };

        let err = cli.run(ScriptKind::Build, &ctx).await.unwrap_err();
        let err = err.downcast::<StructuredError>().unwrap();
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_missing_script_is_structured_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n",
        )
        .unwrap();
        let cli = ScriptCli {
            path: None,
            args: Vec::new(),
        };

        let err = cli.run(ScriptKind::Generate, &ctx).await.unwrap_err();
        let err = err.downcast::<StructuredError>().unwrap();
        assert!(err.message().starts_with("No 'generate' script"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_runs_in_project_with_args() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            r#"[project]
name = "demo"

[scripts]
test = "sh -c 'printf \"%s|\" \"$@\" > out.txt' x"
"#,
        )
        .unwrap();
        let cli = ScriptCli {
            path: None,
            args: strings(&["one two", "$HOME"]),
        };

        cli.run(ScriptKind::Test, &ctx).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("out.txt")).unwrap(),
            "one two|$HOME|"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_exit_code_is_carried() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[scripts]\nbuild = \"exit 4\"\n",
        )
        .unwrap();
        let cli = ScriptCli {
            path: None,
            args: Vec::new(),
        };

        let err = cli.run(ScriptKind::Build, &ctx).await.unwrap_err();
        assert_eq!(crate::outcome::exit_code_for(&err), 4);
    }
}
