//! List directory tool definition.
//!
//! Lists the entries of a directory inside the allowed roots.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::security::RootSet;

/// Parameters for the list directory tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListDirectoryParams {
    /// Path to the directory to list.
    pub path: String,
}

/// List directory tool.
pub struct ListDirectoryTool;

impl ListDirectoryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_directory";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List the entries of a directory within the allowed directories. \
         Directories are marked [DIR] and files [FILE].";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &ListDirectoryParams, roots: &RootSet) -> CallToolResult {
        info!("List directory tool called for path: {}", params.path);

        let path = match roots.resolve(&params.path) {
            Ok(path) => path,
            Err(err) => {
                warn!("Path authorization failed: {}", err);
                return CallToolResult::error(vec![Content::text(format!(
                    "Path authorization failed: {err}"
                ))]);
            }
        };

        if !path.is_dir() {
            warn!("Path is not a directory: {}", params.path);
            return CallToolResult::error(vec![Content::text(format!(
                "Path is not a directory: {}",
                params.path
            ))]);
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to read directory: {}", err);
                return CallToolResult::error(vec![Content::text(format!(
                    "Failed to read directory: {err}"
                ))]);
            }
        };

        let mut lines = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Error reading entry: {}", err);
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let marker = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => "[DIR] ",
                Ok(_) => "[FILE]",
                Err(err) => {
                    warn!("Failed to get type of {}: {}", name, err);
                    continue;
                }
            };
            lines.push(format!("{marker} {name}"));
        }
        lines.sort();

        info!("Listed {} entries in {}", lines.len(), params.path);

        CallToolResult::success(vec![Content::text(lines.join("\n"))])
    }

    /// HTTP handler for this tool.
    pub fn http_handler(
        arguments: serde_json::Value,
        roots: Arc<RootSet>,
    ) -> Result<serde_json::Value, String> {
        let path = arguments
            .get("path")
            .and_then(|value| value.as_str())
            .ok_or_else(|| "Missing or invalid 'path' parameter".to_string())?
            .to_string();

        let result = Self::execute(&ListDirectoryParams { path }, &roots);

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
            input_schema: cached_schema_for_type::<ListDirectoryParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let roots = roots.clone();
            async move {
                let params: ListDirectoryParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &roots))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_list_directory_execute() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("file1.txt"), "content").unwrap();
        fs::create_dir(temp_dir.path().join("subdir")).unwrap();

        let roots = RootSet::new(&[temp_dir.path().to_string_lossy().to_string()]).unwrap();
        let params = ListDirectoryParams {
            path: temp_dir.path().to_string_lossy().to_string(),
        };

        let result = ListDirectoryTool::execute(&params, &roots);
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = text_of(&result);
        assert!(text.contains("[FILE] file1.txt"));
        assert!(text.contains("[DIR]  subdir"));
    }

    #[test]
    fn test_list_directory_outside_roots_is_rejected() {
        let allowed = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();

        let roots = RootSet::new(&[allowed.path().to_string_lossy().to_string()]).unwrap();
        let params = ListDirectoryParams {
            path: other.path().to_string_lossy().to_string(),
        };

        let result = ListDirectoryTool::execute(&params, &roots);
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("authorization"));
    }

    #[test]
    fn test_list_directory_on_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "content").unwrap();

        let roots = RootSet::new(&[temp_dir.path().to_string_lossy().to_string()]).unwrap();
        let params = ListDirectoryParams {
            path: file.to_string_lossy().to_string(),
        };

        let result = ListDirectoryTool::execute(&params, &roots);
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_http_handler_missing_param() {
        let temp_dir = TempDir::new().unwrap();
        let roots =
            Arc::new(RootSet::new(&[temp_dir.path().to_string_lossy().to_string()]).unwrap());

        let result = ListDirectoryTool::http_handler(serde_json::json!({}), roots);
        assert!(result.is_err());
    }
}
