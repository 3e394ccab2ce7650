//! Process-wide context.
//!
//! Created once in `main` and handed to the dispatcher, hooks, commands and
//! the outcome translator. Holds the read-only environment and configuration
//! plus the one piece of shared mutable state, the pending task registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use forge_analytics::{AnalyticsSink, NoopSink};
use forge_common::{Environment, ForgeConfig};

use crate::TOOL_NAME;
use crate::pending::PendingTasks;

pub struct ProcessContext {
    tool_name: String,
    environment: Environment,
    config: ForgeConfig,
    analytics: Arc<dyn AnalyticsSink>,
    pending: PendingTasks,
}

impl ProcessContext {
    /// Context with analytics going nowhere until [`Self::with_analytics`].
    pub fn new(environment: Environment, config: ForgeConfig) -> Self {
        Self {
            tool_name: TOOL_NAME.to_string(),
            environment,
            config,
            analytics: Arc::new(NoopSink),
            pending: PendingTasks::new(),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn analytics(&self) -> &Arc<dyn AnalyticsSink> {
        &self.analytics
    }

    pub fn pending(&self) -> &PendingTasks {
        &self.pending
    }

    pub fn verbose(&self) -> bool {
        self.environment.verbose
    }

    pub fn cwd(&self) -> &Path {
        &self.environment.cwd
    }

    /// Usage tracking is on unless opted out via environment or config.
    pub fn stats_enabled(&self) -> bool {
        !self.environment.stats_opt_out && self.config.analytics.enabled
    }

    /// Resolve an optional `--path` argument against the current directory.
    pub fn project_root(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(path) => crate::argv::resolve_against(self.cwd(), path),
            None => self.cwd().to_path_buf(),
        }
    }
}

impl std::fmt::Debug for ProcessContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessContext")
            .field("tool_name", &self.tool_name)
            .field("environment", &self.environment)
            .field("config", &self.config)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
