//! External plugin commands.
//!
//! A selector that is not a built-in command may name a plugin: an
//! executable called `<tool>-<selector>` on `PATH`. The plugin receives the
//! remaining arguments untouched and its exit code becomes forge's.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use forge_common::environment::VERBOSE_ENV;

use crate::error::exit_codes;

/// Looks up plugin executables for a selector.
pub trait ExternalCommandResolver: Send + Sync {
    fn resolve(&self, selector: &str) -> Option<PathBuf>;
}

/// Executable name of the plugin for `selector`.
pub fn plugin_program_name(tool: &str, selector: &str) -> String {
    format!("{tool}-{selector}")
}

/// Whether `selector` can name a plugin at all.
///
/// Empty selectors, flags and anything containing a path separator never
/// resolve.
pub fn is_plugin_selector(selector: &str) -> bool {
    !selector.is_empty()
        && !selector.starts_with('-')
        && !selector.contains('/')
        && !selector.contains(std::path::MAIN_SEPARATOR)
}

/// Resolves plugins on the executable search path.
#[derive(Debug, Clone)]
pub struct PathResolver {
    tool: String,
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl PathResolver {
    /// Resolver over the process `PATH`.
    pub fn from_env(tool: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            search_path: std::env::var_os("PATH"),
            cwd: cwd.into(),
        }
    }

    /// Resolver over an explicit search path.
    pub fn with_search_path(
        tool: impl Into<String>,
        search_path: impl Into<OsString>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tool: tool.into(),
            search_path: Some(search_path.into()),
            cwd: cwd.into(),
        }
    }
}

impl ExternalCommandResolver for PathResolver {
    fn resolve(&self, selector: &str) -> Option<PathBuf> {
        if !is_plugin_selector(selector) {
            return None;
        }
        let program = plugin_program_name(&self.tool, selector);
        which::which_in(&program, self.search_path.as_ref(), &self.cwd).ok()
    }
}

/// A plugin invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<String>,
    verbose: bool,
}

impl ExternalCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            verbose: false,
        }
    }

    /// Tell the plugin that `--verbose` was passed to forge.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Spawn the plugin with inherited stdio and wait for it.
    pub async fn run(&self) -> anyhow::Result<i32> {
        tracing::debug!(
            "Delegating to {} {:?}",
            self.program.display(),
            self.args
        );

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if self.verbose {
            command.env(VERBOSE_ENV, "true");
        }

        let status = command
            .status()
            .await
            .with_context(|| format!("Failed to run {}", self.program.display()))?;
        Ok(exit_code_of(status))
    }
}

/// Exit code forge should end with for a finished child.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return exit_codes::SIGNAL_BASE + signal;
        }
    }

    exit_codes::FAILURE
}
