//! Transport service - orchestrates the transport lifecycle.
//!
//! Dispatches the resolved configuration to the selected transport: the
//! stdio service is driven directly with the process cancellation token,
//! the network transports run under the shared lifecycle coordinator.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::http::HttpTransport;
use super::runner::run_until_shutdown;
use super::sse::SseTransport;
use super::stdio::StdioTransport;
use super::{TransportKind, TransportResult};
use crate::core::config::Config;
use crate::core::server::FilesystemServer;

/// Transport service - manages the transport layer for the server.
pub struct TransportService {
    config: Config,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start the selected transport with the given backend.
    ///
    /// Blocks until the transport is shut down, by the cancellation
    /// token or by a terminal serve error.
    pub async fn run(
        self,
        server: FilesystemServer,
        cancel: CancellationToken,
    ) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.transport);

        let shutdown_timeout = self.config.shutdown_timeout;
        match self.config.transport {
            TransportKind::Stdio => StdioTransport::run(server, cancel).await,
            TransportKind::Sse => {
                let transport = Arc::new(SseTransport::new(self.config.sse_settings(), server));
                run_until_shutdown(transport, shutdown_timeout, cancel).await
            }
            TransportKind::StreamableHttp => {
                let transport = Arc::new(HttpTransport::new(
                    self.config.streamable_http_settings(),
                    server,
                ));
                run_until_shutdown(transport, shutdown_timeout, cancel).await
            }
        }
    }
}
