//! Logging initialization for the `layouts` binary.
//!
//! Filter directives come from the `LAYOUT_MANAGER_LOG` environment variable
//! and fall back to the `[log] level` configured in `config.toml`.
//!
//! ```bash
//! # Configured level (default info)
//! layouts apply git
//!
//! # Per-intent dispatch logs
//! LAYOUT_MANAGER_LOG=debug layouts apply git
//!
//! # Module-specific filtering
//! LAYOUT_MANAGER_LOG=layout_manager::store=debug,warn layouts create
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "LAYOUT_MANAGER_LOG";

/// Filter from [`LOG_ENV`], or `fallback` when unset or invalid.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Installs the global subscriber.
///
/// Output goes to stderr; stdout carries the host command stream.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(fallback: LogLevel) {
    fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_every_level_is_a_valid_directive() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(
                EnvFilter::try_new(level.as_directive()).is_ok(),
                "failed to parse directive: {}",
                level.as_directive()
            );
        }
    }

    #[test]
    #[serial(env)]
    fn test_env_overrides_configured_level() {
        env::set_var(LOG_ENV, "layout_manager=trace");
        let filter = filter(LogLevel::Warn);
        env::remove_var(LOG_ENV);
        assert_eq!(filter.to_string(), "layout_manager=trace");
    }

    #[test]
    #[serial(env)]
    fn test_configured_level_used_without_env() {
        env::remove_var(LOG_ENV);
        assert_eq!(filter(LogLevel::Debug).to_string(), "debug");
    }
}
