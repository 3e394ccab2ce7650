//! HTTP client factory for the analytics collector.

use reqwest::Client;
use std::time::Duration;

use crate::error::{AnalyticsError, AnalyticsResult};

/// User-Agent string for analytics requests
pub const USER_AGENT: &str = concat!("forge-cli/", env!("CARGO_PKG_VERSION"));

/// Creates an HTTP client with the given per-request timeout.
///
/// Analytics must never hold up process exit for long, so the connect
/// timeout is capped at the request timeout as well.
pub fn create_client(timeout: Duration) -> AnalyticsResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .tcp_nodelay(true)
        .pool_max_idle_per_host(1)
        .build()
        .map_err(|e| AnalyticsError::Client {
            message: e.to_string(),
        })
}
