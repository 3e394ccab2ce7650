//! Common utilities shared across Forge CLI crates.

pub mod config;
pub mod dirs;
pub mod environment;
pub mod manifest;
pub mod timeout;

pub use config::{AnalyticsSettings, ConfigError, ForgeConfig, TemplateSettings};
pub use dirs::{AppDirs, get_forge_home};
pub use environment::{Environment, EnvironmentError, is_truthy};
pub use manifest::{MANIFEST_FILE_NAME, ManifestError, ProjectManifest};
pub use timeout::{ASYNC_EXIT_GRACE, DEFAULT_ANALYTICS_TIMEOUT_MS};

/// Name of the per-project state directory (`<project>/.forge`).
pub const PROJECT_DIR_NAME: &str = ".forge";
