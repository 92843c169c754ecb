//! Error types for agriplay.

use std::io;
use thiserror::Error;

/// Result type alias for agriplay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in agriplay operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Key is empty or would escape the store directory.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Session not found.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Request to the ML API failed (transport, timeout or non-2xx status).
    #[error("ML API error: {0}")]
    Http(#[from] reqwest::Error),

    /// ML API did not answer its health check.
    #[error("ML API unavailable at {0}")]
    ServiceUnavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
