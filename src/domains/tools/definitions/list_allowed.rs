//! List allowed directories tool definition.
//!
//! Reports the directory roots this server instance is authorized to
//! operate within, in configuration order.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::security::RootSet;

/// Parameters for the list allowed directories tool (none).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListAllowedDirectoriesParams {}

/// List allowed directories tool.
pub struct ListAllowedDirectoriesTool;

impl ListAllowedDirectoriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_allowed_directories";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Returns the list of directories that this server is allowed to access.";

    /// Execute the tool logic.
    pub fn execute(roots: &RootSet) -> CallToolResult {
        info!("Listing {} allowed directories", roots.paths().len());

        let listing = roots
            .paths()
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        CallToolResult::success(vec![Content::text(format!(
            "Allowed directories:\n{listing}"
        ))])
    }

    /// HTTP handler for this tool.
    pub fn http_handler(
        _arguments: serde_json::Value,
        roots: Arc<RootSet>,
    ) -> Result<serde_json::Value, String> {
        let result = Self::execute(&roots);

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListAllowedDirectoriesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(roots: Arc<RootSet>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let roots = roots.clone();
            async move { Ok::<_, McpError>(Self::execute(&roots)) }.boxed()
        })
    }
}
