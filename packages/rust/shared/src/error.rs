//! Error types for the search-index builder.
//!
//! Library crates use [`SearchIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all index build operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A static data file could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Data validation error (unsupported locale, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The standards manifest references tables missing from the registry.
    #[error(
        "standards manifest references unknown tables: {}",
        violations.join(", ")
    )]
    Manifest { violations: Vec<String> },

    /// Active tools without a valid localized doc file.
    #[error("missing or invalid tool docs: {}", violations.join(", "))]
    ToolDocs { violations: Vec<String> },

    /// Output serialization failed.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SearchIndexError>;

impl SearchIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
