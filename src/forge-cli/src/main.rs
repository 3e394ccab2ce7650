//! Forge CLI - Main entry point.
//!
//! Sets up logging, the process environment and configuration, starts the
//! analytics bootstrap in the background and hands the arguments to the
//! dispatch pipeline, which ends the process.

use std::sync::Arc;

use forge_analytics::{AnalyticsClient, AnalyticsSink};
use forge_cli::logging::init_logging;
use forge_cli::outcome::{self, Outcome};
use forge_cli::{NormalizedArgs, ProcessContext, argv, entry};
use forge_common::{Environment, ForgeConfig};

#[tokio::main]
async fn main() {
    let args = NormalizedArgs::from_process_args(
        std::env::args_os().map(|a| a.to_string_lossy().into_owned()),
    );
    init_logging(args.verbose());

    let environment = match Environment::bootstrap(args.verbose()) {
        Ok(environment) => environment,
        Err(e) => {
            let translation = outcome::translate(&Outcome::Unstructured(e.into()));
            outcome::emit(&translation);
            outcome::exit(translation.exit_code)
        }
    };

    let project_root = argv::project_root(args.args(), &environment.cwd);
    let config = ForgeConfig::load(&project_root, &environment.dirs).unwrap_or_else(|e| {
        tracing::warn!("{}. Using default settings.", e);
        ForgeConfig::default()
    });

    let mut ctx = ProcessContext::new(environment, config);
    let mut settings = ctx.config().analytics.clone();
    settings.enabled = ctx.stats_enabled();
    let analytics_dir = ctx.environment().dirs.analytics_dir.clone();

    if settings.enabled {
        match AnalyticsClient::new(&settings, &analytics_dir).await {
            Ok(client) => {
                let sink: Arc<dyn AnalyticsSink> = Arc::new(client);
                ctx = ctx.with_analytics(sink);
            }
            Err(e) => tracing::debug!("Analytics disabled: {}", e),
        }
    }

    // Fire and forget; not part of the exit grace period. With analytics
    // disabled it only prepares the directory and installation id.
    tokio::spawn(async move {
        if let Err(e) = forge_analytics::bootstrap(&settings, &analytics_dir).await {
            tracing::debug!("Analytics bootstrap failed: {}", e);
        }
    });

    entry::run(Arc::new(ctx), args).await
}
