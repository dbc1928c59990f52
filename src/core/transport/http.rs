//! Streamable HTTP transport implementation.
//!
//! Stateless JSON-RPC over HTTP POST: every request is answered in the
//! same exchange, notifications are acknowledged with 202.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::config::{StreamableHttpSettings, normalize_bind_addr};
use super::error::{TransportError, TransportResult};
use super::rpc::{self, JsonRpcRequest};
use super::runner::{ServeTransport, ShutdownState};
use crate::core::server::FilesystemServer;

/// Streamable HTTP transport handler.
pub struct HttpTransport {
    settings: StreamableHttpSettings,
    server: FilesystemServer,
    state: ShutdownState,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct HttpState {
    server: FilesystemServer,
    endpoint: String,
}

impl HttpTransport {
    /// Create a new streamable HTTP transport with the given settings.
    pub fn new(settings: StreamableHttpSettings, server: FilesystemServer) -> Self {
        Self {
            settings,
            server,
            state: ShutdownState::new(),
        }
    }

    async fn serve_inner(&self) -> TransportResult<()> {
        let addr = normalize_bind_addr(&self.settings.addr);
        let endpoint = self.settings.base_path.clone();

        let state = HttpState {
            server: self.server.clone(),
            endpoint: endpoint.clone(),
        };

        let app = Router::new()
            .route(&endpoint, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC at POST {})",
            addr, endpoint
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(self.state.drain_signal())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ServeTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "streamable-http"
    }

    async fn serve(&self) -> TransportResult<()> {
        let result = self.serve_inner().await;
        self.state.mark_stopped();
        result
    }

    async fn shutdown(&self, timeout: Duration) -> TransportResult<()> {
        self.state.begin_shutdown(timeout).await
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "streamable-http",
        "endpoints": {
            "rpc": state.endpoint,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<HttpState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match rpc::process_request(&state.server, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
