//! HTTP server startup.

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::lifecycle::Lifecycle;
use crate::server::shutdown::{Shutdown, shutdown_signal, with_deadline};
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// After a shutdown signal, in-flight requests get up to the configured
/// shutdown timeout to complete before the server stops waiting for them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind(server_addr, err)
    })?;

    let Shutdown { signal, deadline } =
        with_deadline(shutdown_signal(), server_config.shutdown_timeout());

    let lifecycle = Lifecycle::start(&server_config);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();

    let outcome = tokio::select! {
        result = server => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Shutdown timeout elapsed with requests still in flight"
            );
            Ok(())
        }
    };

    lifecycle.finish(outcome)
}
