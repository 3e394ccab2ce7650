//! Forge Analytics - best-effort usage tracking for Forge CLI
//!
//! Provides:
//! - [`CommandEvent`], the record submitted after a tracked command runs
//! - [`AnalyticsClient`], which posts events to a collector and spools them
//!   on disk when the collector is unreachable or not configured
//! - [`bootstrap`], the background startup step that prepares the spool and
//!   uploads events left behind by earlier invocations
//!
//! Nothing in this crate is allowed to fail a user command. Callers log
//! errors and move on.
//!
//! # Example
//!
//! ```rust,ignore
//! use forge_analytics::{AnalyticsClient, AnalyticsSink, CommandEvent};
//!
//! let client = AnalyticsClient::new(&settings, &dirs.analytics_dir).await?;
//! let event = CommandEvent::new("build").finished(true, None, elapsed);
//! client.submit(event).await.ok();
//! ```

mod bootstrap;
mod client;
mod error;
mod event;
mod http;
mod spool;

use async_trait::async_trait;

pub use bootstrap::{BootstrapReport, INSTALLATION_ID_FILE, bootstrap, read_installation_id};
pub use client::{AnalyticsClient, Delivery};
pub use error::{AnalyticsError, AnalyticsResult};
pub use event::CommandEvent;
pub use http::{USER_AGENT, create_client};
pub use spool::{EventSpool, MAX_SPOOLED_EVENTS, SPOOL_FILE};

/// Current version of Forge CLI (set at compile time)
pub const FORGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Destination for usage events.
///
/// Implemented by [`AnalyticsClient`]; tests substitute recording or failing
/// sinks.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Submit one event. Errors are for logging only.
    async fn submit(&self, event: CommandEvent) -> AnalyticsResult<Delivery>;
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl AnalyticsSink for NoopSink {
    async fn submit(&self, _event: CommandEvent) -> AnalyticsResult<Delivery> {
        Ok(Delivery::Dropped)
    }
}
