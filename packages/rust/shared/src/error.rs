//! Error types for mdxhook.
//!
//! Library crates use [`MdxHookError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdxhook operations.
#[derive(Debug, thiserror::Error)]
pub enum MdxHookError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Frontmatter block or key-value line could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A git invocation failed (non-zero exit or spawn failure).
    #[error("git error: {0}")]
    Git(String),

    /// The downstream lint runner failed.
    #[error("lint error: {0}")]
    Lint(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Hook installation error (existing foreign hook, missing .git, etc.).
    #[error("install error: {message}")]
    Install { message: String },

    /// Input validation error (bad path, existing target, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdxHookError>;

impl MdxHookError {
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

    /// Create an install error from any displayable message.
    pub fn install(msg: impl Into<String>) -> Self {
        Self::Install {
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
