//! Outcome translation and process termination.
//!
//! Every invocation ends in exactly one [`Outcome`]. [`translate`] turns it
//! into an exit code plus an optional log line, and [`terminate`] emits the
//! line, gives pending background work its grace period and exits.

use std::io::Write;

use forge_common::ASYNC_EXIT_GRACE;

use crate::error::{StructuredError, exit_codes};
use crate::pending::PendingTasks;

/// Log severity of a terminal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    Structured(StructuredError),
    Unstructured(anyhow::Error),
    /// A plugin ran to completion; its exit code is forge's.
    Delegated { exit_code: i32 },
}

impl Outcome {
    pub fn from_result(result: anyhow::Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(e) => Self::from_error(e),
        }
    }

    /// Recover a [`StructuredError`] from anywhere in the error chain.
    pub fn from_error(error: anyhow::Error) -> Self {
        match error.downcast::<StructuredError>() {
            Ok(structured) => Outcome::Structured(structured),
            Err(error) => match error.chain().find_map(|e| e.downcast_ref::<StructuredError>()) {
                Some(structured) => Outcome::Structured(structured.clone()),
                None => Outcome::Unstructured(error),
            },
        }
    }
}

/// Exit code and message for an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub exit_code: i32,
    pub severity: Option<Severity>,
    pub message: Option<String>,
}

impl Translation {
    fn quiet(exit_code: i32) -> Self {
        Self {
            exit_code,
            severity: None,
            message: None,
        }
    }
}

pub fn translate(outcome: &Outcome) -> Translation {
    match outcome {
        Outcome::Success => Translation::quiet(exit_codes::SUCCESS),
        Outcome::Delegated { exit_code } => Translation::quiet(*exit_code),
        Outcome::Structured(error) => structured(error),
        Outcome::Unstructured(error) => structured(&StructuredError::unhandled(error)),
    }
}

fn structured(error: &StructuredError) -> Translation {
    if error.is_silent() || error.message().is_empty() {
        return Translation::quiet(error.exit_code());
    }
    let severity = if error.exit_code() == exit_codes::SUCCESS {
        Severity::Info
    } else {
        Severity::Error
    };
    Translation {
        exit_code: error.exit_code(),
        severity: Some(severity),
        message: Some(error.message().to_string()),
    }
}

/// Exit code an error would end the process with.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|e| e.downcast_ref::<StructuredError>())
        .map_or(exit_codes::FAILURE, StructuredError::exit_code)
}

/// Log the translated message, if any.
pub fn emit(translation: &Translation) {
    let Some(message) = &translation.message else {
        return;
    };
    match translation.severity {
        Some(Severity::Info) => tracing::info!("{}", message),
        Some(Severity::Error) | None => tracing::error!("{}", message),
    }
}

/// Translate, log, drain pending work on success, then exit.
pub async fn terminate(outcome: Outcome, pending: &PendingTasks) -> ! {
    if let Outcome::Unstructured(error) = &outcome {
        tracing::debug!("Unhandled error: {:?}", error);
    }
    let translation = translate(&outcome);
    emit(&translation);

    if matches!(outcome, Outcome::Success) && !pending.is_empty() {
        pending.wait(ASYNC_EXIT_GRACE).await;
    }
    exit(translation.exit_code)
}

/// Flush standard streams and end the process.
pub fn exit(code: i32) -> ! {
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    std::process::exit(code)
}
