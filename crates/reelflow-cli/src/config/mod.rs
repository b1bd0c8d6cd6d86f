//! Command-line and environment settings for the `reelflow` binary.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! └── service: ServiceConfig       # n8n webhook and HTTP client
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use middleware::MiddlewareConfig;
use reelflow_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Every setting the binary accepts.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "reelflow")]
#[command(about = "Turns video briefs into n8n automation runs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub server: ServerConfig,

    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Webhook endpoint; mock mode when unset.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Parses arguments after loading `.env`, so its values feed clap's `env` lookups.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("reelflow: ignoring unreadable .env ({err})");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .webhook_url()
            .context("invalid automation webhook configuration")?;
        self.middleware
            .validate(self.service.http_client.effective_timeout())
            .context("invalid middleware configuration")?;
        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "starting reelflow server"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.server.log();
        self.middleware.log();

        // The webhook URL may embed credentials; only its presence is logged.
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            webhook_configured = self.service.is_webhook_configured(),
            http_timeout_secs = self.service.http_client.effective_timeout().as_secs(),
            "Automation configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
