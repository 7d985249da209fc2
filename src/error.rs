//! Unified error types for Thicket with fail-open philosophy.
//!
//! The search engine itself never fails: bad documents are skipped and empty
//! inputs produce empty results. Errors only arise at the edges (reading the
//! corpus, loading the alias dictionary, parsing hook payloads). The hook path
//! treats all of them as fail-open so a broken knowledge base never blocks a
//! prompt.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Thicket operations.
#[derive(Error, Debug)]
pub enum ThicketError {
    /// I/O errors from corpus or config file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Corpus loading errors (directory unreadable, document rejected).
    #[error("corpus error: {message}")]
    Corpus { message: String },

    /// Alias dictionary missing or malformed.
    #[error("alias dictionary error at {path}: {message}")]
    AliasDictionary { path: PathBuf, message: String },
}

/// A specialized Result type for Thicket operations.
pub type Result<T> = std::result::Result<T, ThicketError>;

impl ThicketError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a corpus error.
    pub fn corpus(message: impl Into<String>) -> Self {
        Self::Corpus {
            message: message.into(),
        }
    }

    /// Create an alias dictionary error.
    pub fn alias_dictionary(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::AliasDictionary {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<io::Error> for ThicketError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ThicketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error and return a safe default instead of propagating it.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the Thicket CLI.
pub mod exit_codes {
    /// Command completed (hooks always exit with this code).
    pub const SUCCESS: i32 = 0;

    /// Command failed (interactive commands only).
    pub const ERROR: i32 = 1;

    /// Process panicked; hooks treat this as a silent no-op.
    pub const CRASH: i32 = 3;
}
