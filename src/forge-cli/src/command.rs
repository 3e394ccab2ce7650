//! The contract every in-process command fulfils.

use async_trait::async_trait;

use crate::context::ProcessContext;

/// A parsed, ready-to-run built-in command.
///
/// Commands are moved into a background task when usage tracking is on,
/// hence the `Send + 'static` bound.
#[async_trait]
pub trait RunnableCommand: Send + Sync + 'static {
    /// Registry name of the command (`build`, `scaffold`, ...).
    fn name(&self) -> &'static str;

    /// Run the command. A [`crate::StructuredError`] inside the returned
    /// error decides the exit code; anything else is an unhandled failure.
    async fn run(&self, ctx: &ProcessContext) -> anyhow::Result<()>;
}
