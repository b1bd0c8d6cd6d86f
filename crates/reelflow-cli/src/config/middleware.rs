//! Cross-origin and request recovery settings.

use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use reelflow_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Accepted inbound request timeout, in seconds.
const REQUEST_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

/// Groups that are defined next to their layers in `reelflow-server`.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Rejects request timeouts outside 1-300s or not above the webhook
    /// timeout.
    pub fn validate(&self, webhook_timeout: Duration) -> anyhow::Result<()> {
        let request_timeout = self.recovery.request_timeout;
        ensure!(
            REQUEST_TIMEOUT_RANGE.contains(&request_timeout),
            "request timeout of {request_timeout}s is outside {}-{}s",
            REQUEST_TIMEOUT_RANGE.start(),
            REQUEST_TIMEOUT_RANGE.end()
        );
        ensure!(
            self.recovery.request_timeout() > webhook_timeout,
            "request timeout of {request_timeout}s must exceed the webhook timeout of {}s",
            webhook_timeout.as_secs()
        );
        Ok(())
    }

    pub fn log(&self) {
        let cors = &self.cors;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = cors.allowed_origins.len(),
            allow_credentials = cors.allow_credentials,
            max_age = cors.max_age_seconds,
            request_timeout = self.recovery.request_timeout,
            "Middleware configuration"
        );
    }
}
