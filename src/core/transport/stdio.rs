//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default mode. All
//! logging goes to stderr so stdout stays reserved for JSON-RPC.

use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::error::{TransportError, TransportResult};
use crate::core::server::FilesystemServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects or the
    /// cancellation token fires.
    pub async fn run(server: FilesystemServer, cancel: CancellationToken) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve_with_ct(rmcp::transport::stdio(), cancel)
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
