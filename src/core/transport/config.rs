//! Transport selection and per-transport settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The transport a server run is exposed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Standard input/output (default for MCP).
    Stdio,

    /// Server-Sent Events over HTTP.
    Sse,

    /// Streamable HTTP (JSON-RPC over POST).
    StreamableHttp,
}

impl TransportKind {
    /// Resolve a transport name leniently.
    ///
    /// Matching is case-insensitive with surrounding whitespace ignored,
    /// and `http` is accepted as a synonym for `streamable-http`. An
    /// empty value means the stdio default. Anything unrecognized also
    /// degrades to stdio with a warning instead of failing.
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "stdio" => Self::Stdio,
            "sse" => Self::Sse,
            "http" | "streamable-http" => Self::StreamableHttp,
            other => {
                warn!("Unknown transport {:?}, defaulting to stdio", other);
                Self::Stdio
            }
        }
    }

    /// Check if this is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        matches!(self, Self::Stdio)
    }
}

impl Default for TransportKind {
    fn default() -> Self {
        Self::Stdio
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Sse => write!(f, "sse"),
            Self::StreamableHttp => write!(f, "streamable-http"),
        }
    }
}

/// Settings for the SSE transport.
#[derive(Debug, Clone)]
pub struct SseSettings {
    /// Address to bind, `host:port` or `:port` for all interfaces.
    pub addr: String,

    /// Public base URL used when advertising the message endpoint.
    pub base_url: String,

    /// Path prefix for both HTTP endpoints.
    pub base_path: String,

    /// Relative path of the event-stream endpoint.
    pub sse_path: String,

    /// Relative path of the message endpoint.
    pub message_path: String,

    /// Interval for keep-alive pings, disabled when `None`.
    pub keep_alive: Option<Duration>,

    /// Advertise the full base URL in the endpoint event.
    pub use_full_url: bool,
}

/// Settings for the streamable HTTP transport.
#[derive(Debug, Clone)]
pub struct StreamableHttpSettings {
    /// Address to bind, `host:port` or `:port` for all interfaces.
    pub addr: String,

    /// Path of the JSON-RPC endpoint.
    pub base_path: String,
}

/// Expand a bare `:port` address to all interfaces for binding.
pub(crate) fn normalize_bind_addr(addr: &str) -> String {
    if let Some(port) = addr.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else {
        addr.to_string()
    }
}
