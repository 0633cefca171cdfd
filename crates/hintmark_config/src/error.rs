//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading JSHint configuration or plugin settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON (comments are allowed).
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// The file parsed, but not into the expected shape.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// An `extends` chain loops back on itself or nests too deeply.
    #[error("Config extends chain is broken at {0}")]
    Extends(PathBuf),

    /// An ignore file could not be compiled.
    #[error("Ignore file error: {0}")]
    Ignore(#[from] ignore::Error),
}

impl ConfigError {
    /// Creates a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid shape error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
