//! Usage tracking around a command run.
//!
//! With analytics disabled the command simply runs. Otherwise it runs on a
//! spawned task that reports its result to the caller first and submits the
//! usage event afterwards, so the caller never waits on the network. The
//! spawned task is registered as pending work for the exit grace period.

use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use forge_analytics::CommandEvent;
use tokio::sync::oneshot;

use crate::command::RunnableCommand;
use crate::context::ProcessContext;
use crate::outcome::exit_code_for;

/// Run `command`, tracking it when analytics are enabled.
pub async fn execute<C: RunnableCommand>(
    command: C,
    ctx: &Arc<ProcessContext>,
) -> anyhow::Result<()> {
    if !ctx.stats_enabled() {
        return command.run(ctx).await;
    }

    let (tx, rx) = oneshot::channel();
    let task_ctx = Arc::clone(ctx);
    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let result = command.run(&task_ctx).await;
        let event = CommandEvent::new(command.name())
            .finished(
                result.is_ok(),
                result.as_ref().err().map(exit_code_for),
                started.elapsed(),
            )
            .with_ci(task_ctx.environment().is_ci);

        // The caller may already be gone; the event is still worth sending
        let _ = tx.send(result);

        match task_ctx.analytics().submit(event).await {
            Ok(delivery) => tracing::debug!("Usage event {:?}", delivery),
            Err(e) => tracing::debug!("Usage event not delivered: {}", e),
        }
    });
    ctx.pending().add(handle);

    rx.await
        .map_err(|_| anyhow!("Command task ended without reporting a result"))?
}
