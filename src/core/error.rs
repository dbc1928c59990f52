//! Error types and handling for the filesystem MCP server.
//!
//! This module defines a unified error type covering configuration
//! resolution, backend construction, and transport failures, so the
//! entrypoint has a single surface to map onto process exit codes.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors. The only fatal one: every other
    /// configuration problem degrades to a default with a warning.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid allowed-directory root at backend construction.
    #[error("invalid allowed directory: {0}")]
    Root(#[from] crate::core::security::RootError),

    /// Failure from the transport layer.
    #[error("transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
