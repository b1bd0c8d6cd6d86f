//! Startup and shutdown bookkeeping for a running server.

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Tracks one serving session from bind to exit.
#[derive(Debug)]
pub struct Lifecycle {
    addr: SocketAddr,
    started_at: Instant,
}

impl Lifecycle {
    /// Marks the server as accepting connections.
    pub fn start(config: &ServerConfig) -> Self {
        let addr = config.server_addr();
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %addr,
            "Accepting automation requests"
        );

        if config.binds_to_all_interfaces() {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %addr,
                "Listening on every interface; restrict access with a firewall or reverse proxy"
            );
        }

        Self {
            addr,
            started_at: Instant::now(),
        }
    }

    /// Returns how long the server has been running.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Logs the outcome of the serve loop and converts IO failures.
    pub fn finish(self, outcome: io::Result<()>) -> ServerResult<()> {
        let uptime_secs = self.uptime().as_secs();

        let Err(err) = outcome else {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                addr = %self.addr,
                uptime_secs,
                "Server stopped"
            );
            return Ok(());
        };

        let error = ServerError::Runtime(err);
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            addr = %self.addr,
            uptime_secs,
            error = %error.io_error(),
            suggestion = error.suggestion(),
            "Server stopped unexpectedly"
        );
        Err(error)
    }
}
