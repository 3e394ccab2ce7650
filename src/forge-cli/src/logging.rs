//! Logging setup.
//!
//! All user-facing diagnostics go through `tracing` to stderr. Without
//! `--verbose` lines are bare messages; with it the level is shown and debug
//! output is enabled. `FORGE_LOG_LEVEL` picks the level otherwise, and
//! `RUST_LOG` overrides everything when set.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the default log level.
pub const LOG_LEVEL_ENV: &str = "FORGE_LOG_LEVEL";

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Level for this process: `--verbose` wins over `FORGE_LOG_LEVEL`.
    pub fn resolve(verbose: bool, env_level: Option<&str>) -> LogLevel {
        if verbose {
            return LogLevel::Debug;
        }
        env_level
            .and_then(LogLevel::from_str_loose)
            .unwrap_or_default()
    }
}

/// Filter directives for `level`, scoped to forge's own crates.
pub fn filter_directives(level: LogLevel) -> String {
    let level = level.as_filter_str();
    format!("warn,forge={level},forge_cli={level},forge_common={level},forge_analytics={level}")
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = LogLevel::resolve(verbose, env_level.as_deref());

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(filter_directives(level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_level() {
        assert_eq!(LogLevel::resolve(true, Some("error")), LogLevel::Debug);
        assert_eq!(LogLevel::resolve(false, Some("WARN")), LogLevel::Warn);
        assert_eq!(LogLevel::resolve(false, Some("loud")), LogLevel::Info);
        assert_eq!(LogLevel::resolve(false, None), LogLevel::Info);
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives(LogLevel::Debug),
            "warn,forge=debug,forge_cli=debug,forge_common=debug,forge_analytics=debug"
        );
    }
}
