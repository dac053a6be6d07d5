//! Error types for the WordPiece tokenizer.
//!
//! All fallible operations return [`WordPieceError`] through the crate-wide
//! [`Result`] alias. Failures are confined to startup (loading and validating
//! the vocabulary) and to I/O in the command-line front end; tokenizing text
//! with the built-in pipeline stages never fails.
//!
//! # Examples
//!
//! ```
//! use wordpiece::error::{Result, WordPieceError};
//!
//! fn load() -> Result<()> {
//!     Err(WordPieceError::config("unk_token is missing"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tokenizer operations.
#[derive(Error, Debug)]
pub enum WordPieceError {
    /// I/O errors (configuration files, input text)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or incomplete tokenizer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors raised by custom pipeline stages
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with WordPieceError.
pub type Result<T> = std::result::Result<T, WordPieceError>;

impl WordPieceError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WordPieceError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WordPieceError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WordPieceError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WordPieceError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error happened while building the tokenizer.
    pub fn is_config(&self) -> bool {
        matches!(self, WordPieceError::Config(_) | WordPieceError::Json(_))
    }
}
