//! Error types for forge-analytics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while recording or submitting analytics.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to build HTTP client: {message}")]
    Client { message: String },

    #[error("Collector returned error {status}")]
    Collector { status: u16 },

    #[error("Spool I/O error at {path}: {source}")]
    Spool {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    pub(crate) fn spool(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spool {
            path: path.into(),
            source,
        }
    }

    /// Check if the collector could not be reached or rejected the request.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Collector { .. })
    }
}
