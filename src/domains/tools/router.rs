//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires
//! them together for the stdio transport.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::security::RootSet;

use super::definitions::{ListAllowedDirectoriesTool, ListDirectoryTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(roots: Arc<RootSet>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListAllowedDirectoriesTool::create_route(roots.clone()))
        .with_route(ListDirectoryTool::create_route(roots))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use tempfile::TempDir;

    struct TestServer {}

    fn test_roots(dir: &TempDir) -> Arc<RootSet> {
        Arc::new(RootSet::new(&[dir.path().to_string_lossy().to_string()]).unwrap())
    }

    #[test]
    fn test_build_router() {
        let temp_dir = TempDir::new().unwrap();
        let router: ToolRouter<TestServer> = build_tool_router(test_roots(&temp_dir));
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_allowed_directories"));
        assert!(names.contains(&"list_directory"));
    }

    #[test]
    fn test_registry_matches_router() {
        let temp_dir = TempDir::new().unwrap();
        let roots = test_roots(&temp_dir);

        let registry = ToolRegistry::new(roots.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(roots);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
