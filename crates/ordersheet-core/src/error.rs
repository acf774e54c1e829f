//! Error types for the ordersheet-core library.
//!
//! Parsing a document is total and never fails. Errors only arise at the
//! edges: reading input, and loading or saving configuration.

use thiserror::Error;

/// Main error type for the ordersheet library.
#[derive(Error, Debug)]
pub enum SheetError {
    /// I/O error while reading a document or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the ordersheet library.
pub type Result<T> = std::result::Result<T, SheetError>;
