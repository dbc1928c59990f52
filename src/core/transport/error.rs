//! Transport error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error from the accept/serve loop.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server initialization error.
    #[error("server initialization error: {0}")]
    Init(String),

    /// Service error from rmcp.
    #[error("service error: {0}")]
    Service(String),

    /// Shutdown was requested on a server that already stopped.
    #[error("server already closed")]
    AlreadyClosed,

    /// The operation was canceled before it could finish.
    #[error("operation canceled")]
    Canceled,

    /// Graceful shutdown did not finish within its deadline.
    #[error("graceful shutdown timed out after {0:?}")]
    ShutdownTimedOut(Duration),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create a service error.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Whether this error is a benign shutdown outcome.
    ///
    /// An already-stopped server or a canceled operation means the server
    /// is down, which is exactly what shutdown wanted. These must not be
    /// reported as failures by the lifecycle coordinator.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyClosed | Self::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_classification() {
        assert!(TransportError::AlreadyClosed.is_benign());
        assert!(TransportError::Canceled.is_benign());
        assert!(!TransportError::ShutdownTimedOut(Duration::from_secs(1)).is_benign());
        assert!(!TransportError::init("boom").is_benign());
        assert!(
            !TransportError::bind(":8080", std::io::Error::other("in use")).is_benign()
        );
    }
}
