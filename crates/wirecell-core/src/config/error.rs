//! # Configuration Errors
//!
//! [`ConfigError`] covers malformed configuration entries (the validation
//! failures caught by the construction pass) as well as reading, parsing and
//! writing configuration documents.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration entry #{index} lacks a type attribute: {entry}")]
    MissingType { index: usize, entry: String },

    #[error("configuration entry #{index} has an invalid '{field}' attribute: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("configuration entry #{index} must be an object or null, got: {entry}")]
    NotAnObject { index: usize, entry: String },

    #[error("reserved '{sentinel}' entry is malformed: {reason}")]
    InvalidReserved { sentinel: String, reason: String },

    #[error("configuration file '{name}' not found (searched {searched:?})")]
    FileNotFound { name: String, searched: Vec<PathBuf> },

    #[error("I/O error during '{operation}' on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse {format} configuration '{}': {message}", path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ConfigError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    /// Whether this error is a validation failure of a configuration entry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingType { .. }
                | ConfigError::InvalidField { .. }
                | ConfigError::NotAnObject { .. }
                | ConfigError::InvalidReserved { .. }
        )
    }
}
