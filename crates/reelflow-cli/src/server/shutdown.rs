//! Graceful shutdown signal handling.

use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio::sync::oneshot;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Waits for a shutdown signal (SIGTERM or SIGINT/Ctrl+C).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %e,
                "Failed to install Ctrl+C handler"
            );
            std::future::pending::<()>().await;
        } else {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Received Ctrl+C signal, initiating graceful shutdown"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    "Received SIGTERM signal, initiating graceful shutdown"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Pair of futures coordinating a bounded graceful shutdown.
///
/// `signal` resolves when the process is asked to stop and is handed to
/// `axum::serve`. `deadline` resolves `timeout` after that.
pub struct Shutdown<S, D> {
    pub signal: S,
    pub deadline: D,
}

/// Wraps `signal` so that in-flight requests get at most `timeout` to drain.
pub fn with_deadline<F>(
    signal: F,
    timeout: Duration,
) -> Shutdown<impl Future<Output = ()>, impl Future<Output = ()>>
where
    F: Future<Output = ()>,
{
    let (notify, notified) = oneshot::channel::<()>();

    let signal = async move {
        signal.await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = timeout.as_secs(),
            "Graceful shutdown initiated"
        );
        let _ = notify.send(());
    };

    let deadline = async move {
        if notified.await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(timeout).await;
    };

    Shutdown { signal, deadline }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_fires_after_signal() {
        let shutdown = with_deadline(async {}, Duration::from_secs(5));
        shutdown.signal.await;

        let started = tokio::time::Instant::now();
        shutdown.deadline.await;
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_waits_for_signal() {
        let shutdown = with_deadline(std::future::pending::<()>(), Duration::from_secs(1));
        let Shutdown { signal, deadline } = shutdown;
        drop(signal);

        let result = tokio::time::timeout(Duration::from_secs(60), deadline).await;
        assert!(result.is_err());
    }
}
