//! Tools domain module.
//!
//! Filesystem tools exposed to MCP clients. Each tool lives in its own
//! file under `definitions/` and knows how to build its own route;
//! `router.rs` assembles the rmcp ToolRouter for the stdio transport and
//! `registry.rs` dispatches calls arriving over the HTTP transports.

pub mod definitions;
mod registry;
pub mod router;

pub use registry::ToolRegistry;
pub use router::build_tool_router;
