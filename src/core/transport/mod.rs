//! Transport layer for the filesystem MCP server.
//!
//! This module provides the transport implementations:
//! - **STDIO**: standard input/output (default for MCP)
//! - **SSE**: Server-Sent Events over HTTP
//! - **Streamable HTTP**: JSON-RPC over HTTP POST
//!
//! plus the lifecycle machinery shared by all of them: the
//! [`ServeTransport`] capability trait, the [`run_until_shutdown`]
//! coordinator, and the process-signal cancellation token.

mod config;
mod error;
pub mod rpc;
mod runner;
mod service;
pub mod signal;

pub mod http;
pub mod sse;
pub mod stdio;

pub use config::{SseSettings, StreamableHttpSettings, TransportKind};
pub use error::{TransportError, TransportResult};
pub use runner::{ServeTransport, run_until_shutdown};
pub use service::TransportService;
