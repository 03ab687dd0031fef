//! Error types for the Verdict library.
//!
//! All fallible operations return [`VerdictError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use verdict::error::{VerdictError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if rate <= 0.0 || rate >= 1.0 {
//!         return Err(VerdictError::configuration("learning rate must lie in (0, 1)"));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.15).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

/// The main error type for Verdict operations.
#[derive(Error, Debug)]
pub enum VerdictError {
    /// I/O errors outside of corpus loading.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid classifier or experiment parameters. Raised before any training.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The corpus directory or one of its files could not be read.
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Error with added context; displays the whole context chain.
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VerdictError.
pub type Result<T> = std::result::Result<T, VerdictError>;

impl VerdictError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        VerdictError::Configuration(msg.into())
    }

    /// Create a new corpus load error.
    pub fn corpus_load<S: Into<String>>(msg: S) -> Self {
        VerdictError::CorpusLoad(msg.into())
    }

    /// Create a corpus load error for an I/O failure on `path`.
    pub fn corpus_io(path: &Path, err: io::Error) -> Self {
        VerdictError::CorpusLoad(format!("{}: {err}", path.display()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VerdictError::Other(msg.into())
    }

    /// Whether this error came from invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, VerdictError::Configuration(_))
    }
}
