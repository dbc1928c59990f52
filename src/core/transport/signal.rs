//! OS signal handling.
//!
//! Process-termination signals are translated into one cancellation
//! token, created at startup and threaded explicitly into the transport
//! layer. Nothing else in the crate registers signal handlers.

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Create a cancellation token that fires on SIGINT or SIGTERM.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let notifier = token.clone();
    tokio::spawn(async move {
        wait_for_termination().await;
        info!("Termination signal received");
        notifier.cancel();
    });
    token
}

async fn wait_for_termination() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for interrupt signal: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}
