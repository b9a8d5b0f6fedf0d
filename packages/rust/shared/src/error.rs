//! Error types for Scopewise.
//!
//! Library crates use [`ScopewiseError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! The scoring engine itself never fails: these errors only arise while
//! loading configuration, answer files, and catalogs, or writing reports.

use std::path::PathBuf;

/// Top-level error type for all Scopewise host operations.
#[derive(Debug, thiserror::Error)]
pub enum ScopewiseError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A JSON or TOML document could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The feature catalog is malformed (fails fast at load time).
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unsupported format, bad output, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScopewiseError>;

impl ScopewiseError {
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

    /// Create a catalog error from any displayable message.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ScopewiseError::config("unknown output format");
        assert_eq!(err.to_string(), "config error: unknown output format");

        let err = ScopewiseError::catalog("duplicate feature id 'synonyms'");
        assert!(err.to_string().starts_with("catalog error:"));
        assert!(err.to_string().contains("'synonyms'"));
    }

    #[test]
    fn io_error_carries_path() {
        let err = ScopewiseError::io(
            "/tmp/answers.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("answers.json"));
    }
}
