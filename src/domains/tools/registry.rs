//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the single source of truth for tool metadata and
//! dispatches tool calls arriving over the HTTP transports.

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::warn;

use crate::core::security::RootSet;

use super::definitions::{ListAllowedDirectoriesTool, ListDirectoryTool};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    roots: Arc<RootSet>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(roots: Arc<RootSet>) -> Self {
        Self { roots }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![ListAllowedDirectoriesTool::NAME, ListDirectoryTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListAllowedDirectoriesTool::to_tool(),
            ListDirectoryTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            ListAllowedDirectoriesTool::NAME => {
                ListAllowedDirectoriesTool::http_handler(arguments, self.roots.clone())
            }
            ListDirectoryTool::NAME => {
                ListDirectoryTool::http_handler(arguments, self.roots.clone())
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {name}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_registry(dir: &TempDir) -> ToolRegistry {
        ToolRegistry::new(Arc::new(
            RootSet::new(&[dir.path().to_string_lossy().to_string()]).unwrap(),
        ))
    }

    #[test]
    fn test_registry_tool_names() {
        let temp_dir = TempDir::new().unwrap();
        let registry = test_registry(&temp_dir);
        let names = registry.tool_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"list_allowed_directories"));
        assert!(names.contains(&"list_directory"));
    }

    #[test]
    fn test_registry_call_list_allowed() {
        let temp_dir = TempDir::new().unwrap();
        let registry = test_registry(&temp_dir);
        let result = registry.call_tool("list_allowed_directories", serde_json::json!({}));
        assert!(result.is_ok());
    }

    #[test]
    fn test_registry_call_unknown() {
        let temp_dir = TempDir::new().unwrap();
        let registry = test_registry(&temp_dir);
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(result.is_err());
    }
}
