//! Structured failures and exit codes.
//!
//! A [`StructuredError`] carries the exit code the process should end with
//! and whether its message should be shown. Commands return it inside an
//! `anyhow::Error`; the outcome translator recovers it by downcasting. Any
//! other error is unstructured and ends up as [`StructuredError::unhandled`].

use thiserror::Error;

/// Process exit codes used by forge itself.
pub mod exit_codes {
    /// Success, or an informational early exit such as `--help`.
    pub const SUCCESS: i32 = 0;
    /// Generic failure, including unhandled errors.
    pub const FAILURE: i32 = 1;
    /// Invalid arguments or unknown command (same code clap uses).
    pub const USAGE: i32 = 2;
    /// A delegated plugin killed by signal N ends forge with `SIGNAL_BASE + N`.
    pub const SIGNAL_BASE: i32 = 128;
}

/// An error with an explicit exit code and an optional silence flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StructuredError {
    exit_code: i32,
    message: String,
    silent: bool,
}

impl StructuredError {
    pub fn new(exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
            silent: false,
        }
    }

    /// Generic failure (`exit_codes::FAILURE`).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(exit_codes::FAILURE, message)
    }

    /// Usage error (`exit_codes::USAGE`).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(exit_codes::USAGE, message)
    }

    /// Exit with `exit_code` without logging anything.
    pub fn silent(exit_code: i32) -> Self {
        Self {
            exit_code,
            message: String::new(),
            silent: true,
        }
    }

    /// Wrap an error that has no structured shape.
    pub fn unhandled(error: &anyhow::Error) -> Self {
        Self::failure(format!("An unexpected error occurred: {error:#}"))
    }

    /// Convert a clap parse error, keeping clap's exit code.
    ///
    /// Help and version displays come back with exit code 0 and are logged
    /// at info severity.
    pub fn from_clap(error: clap::Error) -> Self {
        Self::new(error.exit_code(), error.render().to_string().trim_end())
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Suppress (or re-enable) the message.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}
