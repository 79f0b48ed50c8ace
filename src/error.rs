//! Error types for layout-manager
//!
//! Each concern has its own `thiserror` enum; the top-level [`Error`] wraps
//! them transparently so callers can match on the concern they care about.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::error::ConfigError;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Layout failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Layout Set persistence error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Host rejected an intent
    #[error(transparent)]
    Host(#[from] HostError),

    /// Management action on the wrong layout
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Layout validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming
    #[error("Layout name cannot be empty")]
    EmptyName,

    /// Another layout already uses this name (case-insensitive)
    #[error("A layout named \"{name}\" already exists")]
    NameConflict {
        /// The conflicting name as entered
        name: String,
    },
}

/// Layout Set persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing the settings file
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Settings file or Layout Set could not be parsed
    #[error("Failed to parse settings file {path}: {message}")]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Rename of the temp file over the settings file failed
    #[error("Failed to write settings atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path to the settings file
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },
}

/// Host capability errors
#[derive(Debug, Error)]
pub enum HostError {
    /// The intent maps to no host command
    #[error("Unknown host capability: {capability}")]
    UnknownCapability {
        /// Intent key that could not be resolved
        capability: String,
    },

    /// Writing to or reading from the host channel failed
    #[error("Host channel error: {0}")]
    Io(#[from] std::io::Error),
}

/// Layout management errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// Built-in layouts cannot be edited or deleted
    #[error("\"{0}\" is a built-in layout and cannot be modified")]
    BuiltIn(String),

    /// No layout with that name or action key
    #[error("No layout named \"{0}\"")]
    NotFound(String),
}

/// Result type alias for layout-manager operations
pub type Result<T> = std::result::Result<T, Error>;
