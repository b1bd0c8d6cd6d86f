//! HTTP server startup and lifecycle management.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;

pub use crate::server::error::{ServerError, ServerResult};
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until a shutdown signal.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
/// while running.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    http_server::serve_http(app, config).await
}
