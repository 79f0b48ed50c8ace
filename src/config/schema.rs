//! TOML configuration schema types for layout-manager.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial or empty file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"40ms"`) parsed by the
//! `humantime` crate at the call site.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [store]
/// [host]
/// [commands]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the Layout Set is persisted.
    pub store: StoreConfig,
    /// Host command stream settings.
    pub host: HostConfig,
    /// Intent key to host command id overrides. An empty value unmaps the
    /// intent.
    pub commands: BTreeMap<String, String>,
    /// Logging settings.
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Layout Set location, relative to the workspace root.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Settings file holding the Layout Set.
    pub settings_file: String,
    /// Key of the Layout Set inside the settings file.
    pub setting_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            settings_file: ".vscode/settings.json".to_string(),
            setting_key: "layoutManager.layouts".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Host command stream configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Pause after each intent so the host can settle, e.g. `"40ms"`.
    /// `"0ms"` disables pacing.
    pub command_delay: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            command_delay: "40ms".to_string(),
        }
    }
}

impl HostConfig {
    /// Parses `command_delay`.
    pub fn command_delay(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(self.command_delay.trim())
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration from the `[log]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `LAYOUT_MANAGER_LOG` is unset.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
