//! Default configuration template and file creation.
//!
//! Provides a commented TOML template that matches `Config::default()` and a
//! function to write it to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Layout Manager Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/layout-manager/config.toml

# ==============================================================================
# Layout Set storage
# ==============================================================================

[store]

# Settings file holding custom layouts, relative to the workspace root.
# Other keys in this file are preserved when layouts are saved.
settings_file = ".vscode/settings.json"

# Key of the layout list inside the settings file.
setting_key = "layoutManager.layouts"

# ==============================================================================
# Host command stream
# ==============================================================================

[host]

# Pause after each command so the host UI can settle.
# Examples: "40ms", "100ms", "0ms" (no pacing)
command_delay = "40ms"

# ==============================================================================
# Command overrides
# ==============================================================================

[commands]

# Map an intent to a different host command id. An empty string unmaps the
# intent, so layouts that need it fail with "Unknown host capability".
# Run `layouts actions --intents` to list intent keys and their commands.
#
# "auxiliary.mode.plan" = "workbench.action.chat.openPlan"
# "panel.view.output" = "workbench.action.output.toggleOutput"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when LAYOUT_MANAGER_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Writes the default template to `path`, or to the XDG location when `None`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(path: Option<&Path>, force: bool) -> Result<PathBuf, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the template to `path`, creating parent dirs.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
