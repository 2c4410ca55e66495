//! Error types for chatgraph-core

use thiserror::Error;

/// Main error type for the chatgraph-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fatal ingestion error for a transcript
    #[error("parse error in {format} transcript: {message}")]
    Parse { format: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown input or output format name
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// Result type alias for chatgraph-core
pub type Result<T> = std::result::Result<T, Error>;
