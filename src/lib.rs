//! Filesystem MCP Server Library
//!
//! A Model Context Protocol (MCP) server scoped to a configured set of
//! allowed filesystem directories, exposed over one of three transports.
//!
//! # Architecture
//!
//! - **core**: configuration resolution, error handling, path
//!   authorization, the backend server, and the transport layer with its
//!   lifecycle coordination
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: filesystem tools callable by MCP clients
//!
//! # Example
//!
//! ```rust,no_run
//! use fs_mcp_server::core::{CliArgs, Config, EnvSnapshot, FilesystemServer};
//!
//! fn main() -> fs_mcp_server::core::Result<()> {
//!     let config = Config::resolve(CliArgs::default(), &EnvSnapshot::capture())?;
//!     let server = FilesystemServer::new(&config.allowed_dirs)?;
//!     // Hand the server to a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, FilesystemServer, Result, TransportService};
