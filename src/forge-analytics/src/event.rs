//! Usage event record.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::FORGE_VERSION;

/// One tracked command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEvent {
    /// Unique id, lets the collector de-duplicate re-uploaded spool entries
    pub id: Uuid,
    /// Built-in command name (`build`, `scaffold`, ...)
    pub name: String,
    pub success: bool,
    /// Exit code carried by a structured failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub forge_version: String,
    pub os: String,
    pub arch: String,
    pub is_ci: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CommandEvent {
    /// Event for `name`, marked successful with zero duration until
    /// [`CommandEvent::finished`] is called.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            success: true,
            exit_code: None,
            duration_ms: 0,
            forge_version: FORGE_VERSION.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            is_ci: false,
            installation_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Record how the command ended.
    pub fn finished(mut self, success: bool, exit_code: Option<i32>, elapsed: Duration) -> Self {
        self.success = success;
        self.exit_code = exit_code;
        self.duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_ci(mut self, is_ci: bool) -> Self {
        self.is_ci = is_ci;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_records_outcome() {
        let event = CommandEvent::new("scaffold").finished(
            false,
            Some(17),
            Duration::from_millis(1250),
        );
        assert_eq!(event.name, "scaffold");
        assert!(!event.success);
        assert_eq!(event.exit_code, Some(17));
        assert_eq!(event.duration_ms, 1250);
        assert_eq!(event.forge_version, FORGE_VERSION);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let event = CommandEvent::new("version");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("exit_code").is_none());
        assert!(json.get("installation_id").is_none());
        assert_eq!(json["os"], std::env::consts::OS);
    }
}
