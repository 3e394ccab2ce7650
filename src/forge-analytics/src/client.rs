//! Analytics client - posts events to the collector.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use forge_common::AnalyticsSettings;

use crate::AnalyticsSink;
use crate::bootstrap::ensure_installation_id;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::event::CommandEvent;
use crate::http::create_client;
use crate::spool::EventSpool;

/// Where a submitted event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the collector
    Sent,
    /// Written to the local spool for a later upload
    Spooled,
    /// Discarded
    Dropped,
}

/// Client for the analytics collector.
///
/// Without an endpoint every event goes to the spool. With an endpoint,
/// events the collector does not accept are spooled and the delivery error
/// is returned so the caller can log it.
pub struct AnalyticsClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    spool: EventSpool,
    installation_id: Option<String>,
}

impl AnalyticsClient {
    /// Create a client for `settings`, spooling into `analytics_dir`.
    ///
    /// Creates the installation id on first use so events from the very
    /// first run carry it.
    pub async fn new(settings: &AnalyticsSettings, analytics_dir: &Path) -> AnalyticsResult<Self> {
        let http = create_client(Duration::from_millis(settings.timeout_ms))?;
        let installation_id = match ensure_installation_id(analytics_dir).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!("No installation id: {}", e);
                None
            }
        };

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            spool: EventSpool::new(analytics_dir),
            installation_id,
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn spool(&self) -> &EventSpool {
        &self.spool
    }

    /// POST a batch of events to `endpoint`.
    pub(crate) async fn post(
        http: &reqwest::Client,
        endpoint: &str,
        events: &[CommandEvent],
    ) -> AnalyticsResult<()> {
        let response = http.post(endpoint).json(events).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::Collector {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsSink for AnalyticsClient {
    async fn submit(&self, mut event: CommandEvent) -> AnalyticsResult<Delivery> {
        if event.installation_id.is_none() {
            event.installation_id = self.installation_id.clone();
        }

        let Some(endpoint) = self.endpoint.as_deref() else {
            self.spool.append(&event).await?;
            return Ok(Delivery::Spooled);
        };

        match Self::post(&self.http, endpoint, std::slice::from_ref(&event)).await {
            Ok(()) => Ok(Delivery::Sent),
            Err(e) => {
                tracing::debug!("Analytics delivery failed, spooling event: {}", e);
                self.spool.append(&event).await?;
                Err(e)
            }
        }
    }
}
