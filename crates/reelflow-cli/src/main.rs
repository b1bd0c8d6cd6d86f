#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use reelflow_server::handler::routes;
use reelflow_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use reelflow_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

pub const TRACING_TARGET_SERVER_STARTUP: &str = "reelflow_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "reelflow_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "reelflow_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "reelflow exited cleanly"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "reelflow exited with an error"
        );
    } else {
        eprintln!("reelflow: {error:#}");
    }

    process::exit(1);
}

/// Parses settings, builds the app and serves it until shutdown.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;
    Ok(())
}

/// Wraps the API routes in the middleware stack. Recovery is outermost and
/// security sits next to the routes.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
