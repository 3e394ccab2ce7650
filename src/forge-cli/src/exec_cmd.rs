//! Exec command.
//!
//! Runs a named `[tasks]` entry from `Forge.toml`. Everything after the task
//! name is forwarded to the task; forge's own options go before it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use forge_common::ProjectManifest;

use crate::context::ProcessContext;
use crate::error::StructuredError;
use crate::script_cmd::{check_exit, run_shell};

/// Run a task defined in Forge.toml.
#[derive(Debug, Parser)]
pub struct ExecCli {
    /// Project directory (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Task name
    pub task: String,

    /// Arguments passed to the task
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl ExecCli {
    pub async fn run(&self, ctx: &ProcessContext) -> Result<()> {
        let root = ctx.project_root(self.path.as_deref());
        let manifest =
            ProjectManifest::load(&root).map_err(|e| StructuredError::failure(e.to_string()))?;
        let line = manifest.task(&self.task).ok_or_else(|| {
            StructuredError::failure(format!("Task '{}' not found", self.task))
        })?;

        let code = run_shell(line, &self.args, &root, ctx.verbose()).await?;
        check_exit("Task", &self.task, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context_in;
    use forge_common::MANIFEST_FILE_NAME;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_runs_task_with_forwarded_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            r#"[project]
name = "demo"

[tasks]
lint = "sh -c 'echo \"$@\" > lint.txt' lint"
"#,
        )
        .unwrap();
        let cli = ExecCli {
            path: None,
            task: "lint".to_string(),
            args: vec!["--fix".to_string(), "--path".to_string(), "x".to_string()],
        };

        cli.run(&ctx).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("lint.txt")).unwrap(),
            "--fix --path x\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_task_carries_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[tasks]\nfail = \"exit 6\"\n",
        )
        .unwrap();
        let cli = ExecCli {
            path: None,
            task: "fail".to_string(),
            args: Vec::new(),
        };

        let err = cli.run(&ctx).await.unwrap_err();
        let err = err.downcast::<StructuredError>().unwrap();
        assert_eq!(err.exit_code(), 6);
        assert_eq!(err.message(), "Task 'fail' failed with exit code 6");
    }
}
