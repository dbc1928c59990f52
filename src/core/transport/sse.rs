//! SSE transport implementation.
//!
//! Server-Sent Events transport: clients open an event stream and are
//! handed a per-session message endpoint in the initial `endpoint`
//! event. JSON-RPC requests are POSTed to that endpoint and the
//! responses are relayed back over the session's event stream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{StreamExt, stream};
use serde::Deserialize;
use tokio::sync::{RwLock, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use super::config::{SseSettings, normalize_bind_addr};
use super::error::{TransportError, TransportResult};
use super::rpc::{self, JsonRpcRequest, JsonRpcResponse};
use super::runner::{ServeTransport, ShutdownState};
use crate::core::server::FilesystemServer;

/// Open sessions, keyed by session id.
type SessionMap = Arc<RwLock<HashMap<String, mpsc::Sender<JsonRpcResponse>>>>;

/// SSE transport handler.
pub struct SseTransport {
    settings: SseSettings,
    server: FilesystemServer,
    state: ShutdownState,
}

/// Application state shared across SSE handlers.
#[derive(Clone)]
struct SseState {
    server: FilesystemServer,
    sessions: SessionMap,
    message_endpoint: String,
    keep_alive: Option<Duration>,
}

impl SseTransport {
    /// Create a new SSE transport with the given settings.
    pub fn new(settings: SseSettings, server: FilesystemServer) -> Self {
        Self {
            settings,
            server,
            state: ShutdownState::new(),
        }
    }

    async fn serve_inner(&self) -> TransportResult<()> {
        let addr = normalize_bind_addr(&self.settings.addr);
        let sse_route = join_route(&self.settings.base_path, &self.settings.sse_path);
        let message_route = join_route(&self.settings.base_path, &self.settings.message_path);

        let state = SseState {
            server: self.server.clone(),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            message_endpoint: advertised_endpoint(&self.settings),
            keep_alive: self.settings.keep_alive,
        };

        let app = Router::new()
            .route(&sse_route, get(sse_handler))
            .route(&message_route, post(message_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (SSE at {}, messages at {})",
            addr, sse_route, message_route
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(self.state.drain_signal())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ServeTransport for SseTransport {
    fn name(&self) -> &'static str {
        "sse"
    }

    async fn serve(&self) -> TransportResult<()> {
        let result = self.serve_inner().await;
        // Recorded on every exit path so a bounded shutdown never waits
        // on a loop that has already returned.
        self.state.mark_stopped();
        result
    }

    async fn shutdown(&self, timeout: Duration) -> TransportResult<()> {
        self.state.begin_shutdown(timeout).await
    }
}

/// Join the base path and a relative endpoint path into one route.
fn join_route(base: &str, rel: &str) -> String {
    if base.is_empty() || base == "/" {
        rel.to_string()
    } else {
        format!("{base}{rel}")
    }
}

/// The message endpoint as advertised to clients in the endpoint event.
fn advertised_endpoint(settings: &SseSettings) -> String {
    let path = join_route(&settings.base_path, &settings.message_path);
    if settings.use_full_url && !settings.base_url.is_empty() {
        format!("{}{}", settings.base_url.trim_end_matches('/'), path)
    } else {
        path
    }
}

/// Handle a new event-stream connection.
async fn sse_handler(
    State(state): State<SseState>,
) -> Response {
    let session_id = Uuid::new_v4().to_string();
    let (tx, rx) = mpsc::channel::<JsonRpcResponse>(32);
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), tx);
    info!("SSE client connected: session {}", session_id);

    let endpoint = format!("{}?sessionId={}", state.message_endpoint, session_id);
    let handshake =
        stream::once(async move { Ok(Event::default().event("endpoint").data(endpoint)) });
    let messages = ReceiverStream::new(rx)
        .map(|response| Event::default().event("message").json_data(&response));

    let sse = Sse::new(handshake.chain(messages));
    match state.keep_alive {
        Some(interval) => sse
            .keep_alive(KeepAlive::new().interval(interval))
            .into_response(),
        None => sse.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// Handle a JSON-RPC request POSTed to the message endpoint.
async fn message_handler(
    State(state): State<SseState>,
    Query(query): Query<MessageQuery>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let Some(session_id) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "missing sessionId").into_response();
    };

    let Some(tx) = state.sessions.read().await.get(&session_id).cloned() else {
        warn!("Message for unknown session {}", session_id);
        return (StatusCode::NOT_FOUND, "unknown session").into_response();
    };

    if let Some(response) = rpc::process_request(&state.server, request).await {
        if tx.send(response).await.is_err() {
            // The event stream is gone; forget the session.
            state.sessions.write().await.remove(&session_id);
            return (StatusCode::GONE, "session closed").into_response();
        }
    }

    StatusCode::ACCEPTED.into_response()
}
