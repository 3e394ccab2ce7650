//! Background work that should finish before the process exits.
//!
//! Commands register fire-and-forget tasks here (analytics submission being
//! the main one). On a successful exit the registry is given a bounded grace
//! period; anything still running after that is abandoned.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Tasks still running in the background.
#[derive(Debug, Default)]
pub struct PendingTasks {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

/// What happened to the registered tasks during [`PendingTasks::wait`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitReport {
    pub completed: usize,
    pub abandoned: usize,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, handle: JoinHandle<()>) {
        self.handles.lock().push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.lock().is_empty()
    }

    /// Wait for every registered task, but no longer than `grace` in total.
    ///
    /// Drains the registry. Tasks that miss the deadline are aborted.
    pub async fn wait(&self, grace: Duration) -> WaitReport {
        let handles = std::mem::take(&mut *self.handles.lock());
        let deadline = Instant::now() + grace;
        let mut report = WaitReport::default();

        for mut handle in handles {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => report.completed += 1,
                Ok(Err(e)) => {
                    tracing::debug!("Background task failed: {}", e);
                    report.completed += 1;
                }
                Err(_) => {
                    handle.abort();
                    report.abandoned += 1;
                }
            }
        }

        if report.abandoned > 0 {
            tracing::debug!(
                "Abandoned {} background task(s) after {:?}",
                report.abandoned,
                grace
            );
        }
        report
    }
}
