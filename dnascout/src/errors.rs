//! Error types for dnascout runs.
//!
//! Only run-level failures live here: an unreadable input, an unknown
//! algorithm, a broken configuration or a worker that died mid-block.
//! Malformed input rows are not errors; the loader records them as
//! [`RowRejection`](crate::records::RowRejection) values and keeps going.
//!
//! ```rust,ignore
//! match search(&config) {
//!     Ok(run) => print!("{}", render_pretty(&run.report)),
//!     Err(SearchError::FileNotFound(path)) => // input missing,
//!     Err(SearchError::UnsupportedAlgorithm(name)) => // bad --algorithm,
//!     Err(e) => // everything else
//! }
//! ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that abort a search run
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Unsupported algorithm: {0} (expected kmp or rabin_karp)")]
    UnsupportedAlgorithm(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Worker for block {block} failed: {message}")]
    WorkerFailed { block: usize, message: String },
    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn worker_failed(block: usize, message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            block,
            message: message.into(),
        }
    }

    /// Maps an open/read failure on `path` to the most specific variant.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
