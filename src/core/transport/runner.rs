//! Transport lifecycle coordination.
//!
//! One coordinator drives every network transport through the same state
//! machine: start the blocking serve loop on its own task, race its
//! outcome against process-termination cancellation, and on cancellation
//! perform a time-bounded graceful shutdown before reporting the serve
//! loop's terminal result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::error::{TransportError, TransportResult};

/// The minimal lifecycle contract a network transport must satisfy.
#[async_trait]
pub trait ServeTransport: Send + Sync + 'static {
    /// Transport name used in log lines.
    fn name(&self) -> &'static str;

    /// Run the accept/serve loop. Blocks until the server stops, cleanly
    /// or with a terminal error (a failed bind included).
    async fn serve(&self) -> TransportResult<()>;

    /// Gracefully stop, waiting at most `timeout` for in-flight work.
    ///
    /// Must be idempotent: a second call, or a call on a server that
    /// already stopped, reports [`TransportError::AlreadyClosed`].
    async fn shutdown(&self, timeout: Duration) -> TransportResult<()>;
}

/// Drive a transport until it stops on its own or `cancel` fires.
///
/// The serve loop's outcome travels through a single-slot one-shot
/// channel whose send never blocks, so the serve task can always report
/// its result even when the coordinator has already returned through the
/// cancellation path. The shutdown deadline is a fresh timeout over a
/// plain duration, deliberately independent of the cancellation that
/// triggered it.
pub async fn run_until_shutdown<T: ServeTransport>(
    transport: Arc<T>,
    shutdown_timeout: Duration,
    cancel: CancellationToken,
) -> TransportResult<()> {
    let (done_tx, mut done_rx) = oneshot::channel();
    let serve = Arc::clone(&transport);
    tokio::spawn(async move {
        // The receiver may have been dropped already; the result is then
        // discarded rather than blocking the serve task.
        let _ = done_tx.send(serve.serve().await);
    });

    tokio::select! {
        _ = cancel.cancelled() => {
            info!("Shutting down {} transport...", transport.name());
            match transport.shutdown(shutdown_timeout).await {
                Ok(()) => {}
                Err(err) if err.is_benign() => {
                    debug!("Shutdown finished with benign outcome: {}", err);
                }
                Err(err) => return Err(err),
            }
            // A successful drain must not mask a serve-time failure that
            // raced in; the loop's own result is still the authority.
            match (&mut done_rx).await {
                Ok(result) => result,
                Err(_) => Ok(()),
            }
        }
        result = &mut done_rx => {
            match result {
                Ok(result) => result,
                Err(_) => Ok(()),
            }
        }
    }
}

/// Shared drain/completion plumbing for the HTTP-style transports.
///
/// `drain_signal` feeds the server's graceful-shutdown future,
/// `mark_stopped` records that the serve loop has returned, and
/// `begin_shutdown` ties both together under one deadline.
pub(crate) struct ShutdownState {
    stop: CancellationToken,
    done: watch::Sender<bool>,
}

impl ShutdownState {
    pub fn new() -> Self {
        let (done, _) = watch::channel(false);
        Self {
            stop: CancellationToken::new(),
            done,
        }
    }

    /// Future that resolves when a drain has been requested.
    pub fn drain_signal(&self) -> impl Future<Output = ()> + Send + 'static {
        self.stop.clone().cancelled_owned()
    }

    /// Record that the serve loop has returned.
    pub fn mark_stopped(&self) {
        self.done.send_replace(true);
    }

    /// Request a drain and wait for the serve loop to finish, bounded by
    /// `timeout`. Idempotent: repeat calls report `AlreadyClosed`.
    pub async fn begin_shutdown(&self, timeout: Duration) -> TransportResult<()> {
        if self.stop.is_cancelled() {
            return Err(TransportError::AlreadyClosed);
        }
        self.stop.cancel();

        let mut done = self.done.subscribe();
        match tokio::time::timeout(timeout, done.wait_for(|stopped| *stopped)).await {
            // A dropped sender means the serve task is gone entirely,
            // which counts as stopped.
            Ok(_) => Ok(()),
            Err(_) => Err(TransportError::ShutdownTimedOut(timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingServe {
        shutdown_calls: AtomicUsize,
    }

    #[async_trait]
    impl ServeTransport for FailingServe {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn serve(&self) -> TransportResult<()> {
            Err(TransportError::init("address in use"))
        }

        async fn shutdown(&self, _timeout: Duration) -> TransportResult<()> {
            self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Drains cleanly when asked; serve reports the configured result.
    struct DrainingServe {
        state: ShutdownState,
        shutdown_calls: AtomicUsize,
        serve_fails: bool,
    }

    impl DrainingServe {
        fn new(serve_fails: bool) -> Self {
            Self {
                state: ShutdownState::new(),
                shutdown_calls: AtomicUsize::new(0),
                serve_fails,
            }
        }
    }

    #[async_trait]
    impl ServeTransport for DrainingServe {
        fn name(&self) -> &'static str {
            "draining"
        }

        async fn serve(&self) -> TransportResult<()> {
            self.state.drain_signal().await;
            self.state.mark_stopped();
            if self.serve_fails {
                Err(TransportError::service("connection reset during drain"))
            } else {
                Ok(())
            }
        }

        async fn shutdown(&self, timeout: Duration) -> TransportResult<()> {
            self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
            self.state.begin_shutdown(timeout).await
        }
    }

    struct StuckServe {
        benign_shutdown: bool,
    }

    #[async_trait]
    impl ServeTransport for StuckServe {
        fn name(&self) -> &'static str {
            "stuck"
        }

        async fn serve(&self) -> TransportResult<()> {
            if self.benign_shutdown {
                // Finishes on its own shortly after shutdown is attempted.
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(())
            } else {
                std::future::pending().await
            }
        }

        async fn shutdown(&self, timeout: Duration) -> TransportResult<()> {
            if self.benign_shutdown {
                Err(TransportError::AlreadyClosed)
            } else {
                Err(TransportError::ShutdownTimedOut(timeout))
            }
        }
    }

    #[tokio::test]
    async fn test_serve_error_returned_without_shutdown() {
        let transport = Arc::new(FailingServe {
            shutdown_calls: AtomicUsize::new(0),
        });
        let cancel = CancellationToken::new();

        let result =
            run_until_shutdown(transport.clone(), Duration::from_secs(1), cancel).await;

        assert!(matches!(result, Err(TransportError::Init(_))));
        assert_eq!(transport.shutdown_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_triggers_shutdown_then_returns_serve_result() {
        let transport = Arc::new(DrainingServe::new(false));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result =
            run_until_shutdown(transport.clone(), Duration::from_secs(1), cancel).await;

        assert!(result.is_ok());
        assert_eq!(transport.shutdown_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_success_does_not_mask_serve_error() {
        let transport = Arc::new(DrainingServe::new(true));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_until_shutdown(transport, Duration::from_secs(1), cancel).await;

        assert!(matches!(result, Err(TransportError::Service(_))));
    }

    #[tokio::test]
    async fn test_benign_shutdown_outcome_is_suppressed() {
        let transport = Arc::new(StuckServe {
            benign_shutdown: true,
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_until_shutdown(transport, Duration::from_secs(1), cancel).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_non_benign_shutdown_error_surfaces() {
        let transport = Arc::new(StuckServe {
            benign_shutdown: false,
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_until_shutdown(transport, Duration::from_millis(20), cancel).await;

        assert!(matches!(result, Err(TransportError::ShutdownTimedOut(_))));
    }

    #[tokio::test]
    async fn test_shutdown_state_is_idempotent() {
        let state = ShutdownState::new();
        state.mark_stopped();

        assert!(state.begin_shutdown(Duration::from_millis(50)).await.is_ok());
        assert!(matches!(
            state.begin_shutdown(Duration::from_millis(50)).await,
            Err(TransportError::AlreadyClosed)
        ));
    }

    #[tokio::test]
    async fn test_shutdown_state_times_out_when_serve_never_stops() {
        let state = ShutdownState::new();
        let result = state.begin_shutdown(Duration::from_millis(20)).await;
        assert!(matches!(result, Err(TransportError::ShutdownTimedOut(_))));
    }
}
