//! Settings file I/O
//!
//! Reads and writes the workspace settings document that holds the Layout
//! Set. The document is handled as a `serde_json::Value` so every key this
//! crate does not own survives a read-modify-write cycle untouched.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::Local;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Read the settings document.
///
/// `//` and `/* */` comments are stripped before parsing. A missing or blank
/// file reads as an empty object.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file exists but cannot be read.
/// Returns `StoreError::Parse` if the content is not a JSON object.
pub fn read_settings(path: &Path) -> Result<Value, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Value::Object(Map::new()));
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut stripped = String::new();
    json_comments::StripComments::new(content.as_bytes())
        .read_to_string(&mut stripped)
        .map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if stripped.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_str(&stripped).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !value.is_object() {
        return Err(StoreError::Parse {
            path: path.to_path_buf(),
            message: "settings root must be a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Write the settings document atomically with temp-file-then-rename
///
/// 1. Create the parent directory if missing
/// 2. Write to `<file>.tmp.<timestamp>` beside the target
/// 3. Fsync
/// 4. Rename over the target
///
/// On rename failure the temp file is left behind as a safety copy.
///
/// # Errors
///
/// Returns `StoreError::Parse` if the value cannot be serialized.
/// Returns `StoreError::Io` if the directory or temp file cannot be written.
/// Returns `StoreError::WriteAtomic` if the rename fails.
pub fn write_settings_atomic(path: &Path, value: &Value) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settings.json".to_string());
    let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let temp_path = path.with_file_name(format!("{file_name}.tmp.{timestamp}"));

    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    fs::write(&temp_path, format!("{json}\n")).map_err(io_err)?;

    let file = fs::File::open(&temp_path).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    fs::rename(&temp_path, path).map_err(|_| StoreError::WriteAtomic {
        path: path.to_path_buf(),
        temp_path: temp_path.clone(),
    })?;

    Ok(())
}
