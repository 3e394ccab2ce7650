//! Background startup step for analytics.

use std::path::Path;
use std::time::Duration;

use forge_common::AnalyticsSettings;

use crate::client::AnalyticsClient;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::http::create_client;
use crate::spool::EventSpool;

/// File holding the anonymous installation id.
pub const INSTALLATION_ID_FILE: &str = "installation-id";

/// What [`bootstrap`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub installation_id: String,
    /// Spooled events accepted by the collector
    pub uploaded: usize,
    /// Spooled events put back after a failed upload
    pub respooled: usize,
}

/// Prepare the analytics directory and flush the spool.
///
/// Creates `analytics_dir`, makes sure an installation id exists and, when
/// analytics are enabled with an endpoint configured, uploads events spooled
/// by earlier runs in a single batch. Events are put back if the upload
/// fails.
pub async fn bootstrap(
    settings: &AnalyticsSettings,
    analytics_dir: &Path,
) -> AnalyticsResult<BootstrapReport> {
    tokio::fs::create_dir_all(analytics_dir)
        .await
        .map_err(|e| AnalyticsError::spool(analytics_dir, e))?;

    let installation_id = ensure_installation_id(analytics_dir).await?;
    let mut report = BootstrapReport {
        installation_id,
        ..Default::default()
    };

    if !settings.enabled {
        return Ok(report);
    }
    let Some(endpoint) = settings.endpoint.as_deref() else {
        return Ok(report);
    };

    let spool = EventSpool::new(analytics_dir);
    if spool.is_empty() {
        return Ok(report);
    }

    let events = spool.take().await?;
    if events.is_empty() {
        return Ok(report);
    }

    let http = create_client(Duration::from_millis(settings.timeout_ms))?;
    match AnalyticsClient::post(&http, endpoint, &events).await {
        Ok(()) => {
            tracing::debug!("Uploaded {} spooled analytics events", events.len());
            report.uploaded = events.len();
            Ok(report)
        }
        Err(e) => {
            spool.append_all(&events).await?;
            report.respooled = events.len();
            tracing::debug!("Spooled analytics upload failed: {}", e);
            Ok(report)
        }
    }
}

/// Read the installation id if one has been created.
pub fn read_installation_id(analytics_dir: &Path) -> Option<String> {
    std::fs::read_to_string(analytics_dir.join(INSTALLATION_ID_FILE))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read the installation id, creating it when missing.
pub(crate) async fn ensure_installation_id(analytics_dir: &Path) -> AnalyticsResult<String> {
    if let Some(id) = read_installation_id(analytics_dir) {
        return Ok(id);
    }

    tokio::fs::create_dir_all(analytics_dir)
        .await
        .map_err(|e| AnalyticsError::spool(analytics_dir, e))?;
    let id = uuid::Uuid::new_v4().to_string();
    let path = analytics_dir.join(INSTALLATION_ID_FILE);
    tokio::fs::write(&path, format!("{id}\n"))
        .await
        .map_err(|e| AnalyticsError::spool(&path, e))?;
    Ok(id)
}
