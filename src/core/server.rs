//! Filesystem MCP server backend.
//!
//! The backend is constructed exactly once, from the final ordered list
//! of allowed directory roots, and then handed unmodified to a single
//! transport for the life of the process. It implements the rmcp
//! `ServerHandler` trait for the stdio transport and exposes a small
//! helper surface (`name`/`version`/`list_tools`/`call_tool`) for the
//! JSON-RPC dispatch used by the HTTP transports.

#[allow(unused_imports)]
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter,
    model::*, service::RequestContext, tool_handler,
};
use std::sync::Arc;

use super::security::RootSet;
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// The filesystem MCP server handler.
#[derive(Clone)]
pub struct FilesystemServer {
    /// Authorized directory roots.
    roots: Arc<RootSet>,

    /// Tool router for handling tool calls over stdio.
    tool_router: ToolRouter<Self>,
}

impl FilesystemServer {
    /// Create a new server scoped to the given allowed directories.
    ///
    /// Fails if any directory does not exist or is not a directory; the
    /// process must not start serving with an unverified allow-list.
    pub fn new(allowed_dirs: &[String]) -> super::error::Result<Self> {
        let roots = Arc::new(RootSet::new(allowed_dirs)?);
        Ok(Self {
            tool_router: build_tool_router::<Self>(roots.clone()),
            roots,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &'static str {
        env!("CARGO_PKG_NAME")
    }

    /// Get the server version.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// The authorized roots (for tool access).
    pub fn roots(&self) -> &Arc<RootSet> {
        &self.roots
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for the HTTP transports).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for the HTTP transports).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.roots.clone());
        registry.call_tool(name, arguments)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic
/// tool routing over stdio.
#[tool_handler]
impl ServerHandler for FilesystemServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Filesystem MCP server. Operations are restricted to the configured \
                 allowed directories."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
