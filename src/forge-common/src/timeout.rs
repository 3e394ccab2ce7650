//! Centralized timeout constants for the Forge CLI.

use std::time::Duration;

/// Grace period given to pending background tasks after a successful run.
///
/// Once a command has finished, the process waits at most this long for
/// in-flight analytics submissions before exiting. Tasks still running when
/// it elapses are abandoned.
pub const ASYNC_EXIT_GRACE: Duration = Duration::from_secs(2);

/// Default timeout for a single analytics HTTP request in milliseconds.
pub const DEFAULT_ANALYTICS_TIMEOUT_MS: u64 = 1500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_timeout_values_are_reasonable() {
        // A single request must fit inside the exit grace period
        assert!(Duration::from_millis(DEFAULT_ANALYTICS_TIMEOUT_MS) < ASYNC_EXIT_GRACE);

        // Exiting should never feel stuck
        assert!(ASYNC_EXIT_GRACE <= Duration::from_secs(5));
    }
}
