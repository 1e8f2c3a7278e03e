//! Error types for the Polyglex library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PolyglexError`] enum. Failures below the language or shard-job boundary
//! are recovered locally by the pipeline; only fetch failures and construction
//! errors surface to callers.
//!
//! # Examples
//!
//! ```
//! use polyglex::error::{PolyglexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PolyglexError::invalid_config("min_length must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Polyglex operations.
#[derive(Error, Debug)]
pub enum PolyglexError {
    /// I/O errors (reading sources, writing shards)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source parsing errors
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// A language source could not be obtained
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Similarity index errors
    #[error("Index error: {0}")]
    Index(String),

    /// Rejected configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failures with no closer category, such as a thread pool that
    /// could not be started
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PolyglexError.
pub type Result<T> = std::result::Result<T, PolyglexError>;

impl PolyglexError {
    /// Create a new ingest error.
    pub fn ingest<S: Into<String>>(msg: S) -> Self {
        PolyglexError::Ingest(msg.into())
    }

    /// Create a new fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        PolyglexError::Fetch(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        PolyglexError::Index(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PolyglexError::InvalidConfig(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        PolyglexError::Other(format!("Internal error: {}", msg.into()))
    }
}
