//! Shell completion generation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};

use crate::TOOL_NAME;
use crate::cli::Cli;

/// Generate shell completion scripts.
#[derive(Debug, Parser)]
pub struct CompletionCli {
    /// Shell to generate completions for (detected from $SHELL when omitted)
    #[arg(value_enum)]
    pub shell: Option<Shell>,
}

impl CompletionCli {
    pub fn run(&self) -> Result<()> {
        let shell = self.shell.unwrap_or_else(detect_shell_from_env);
        let script = completion_script(shell);

        let mut stdout = io::stdout().lock();
        match stdout.write_all(&script).and_then(|()| stdout.flush()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other.context("Failed to write completion script"),
        }
    }
}

/// Completion script for `shell`.
pub fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, TOOL_NAME, &mut buffer);
    buffer
}

fn detect_shell_from_env() -> Shell {
    let shell = std::env::var("SHELL").ok().and_then(|path| {
        std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
    });

    match shell.as_deref() {
        Some("bash") => Shell::Bash,
        Some("zsh") => Shell::Zsh,
        Some("fish") => Shell::Fish,
        Some("powershell" | "pwsh") => Shell::PowerShell,
        Some("elvish") => Shell::Elvish,
        Some(other) => {
            tracing::warn!("Unknown shell '{}' from $SHELL. Defaulting to bash.", other);
            Shell::Bash
        }
        None if cfg!(windows) => Shell::PowerShell,
        None => Shell::Bash,
    }
}
