//! Outbound HTTP settings for the n8n webhook client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Applied when `--http-timeout` is unset or zero.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(default)]
pub struct ReqwestConfig {
    /// Seconds to wait for the webhook to answer (0 falls back to 30)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    pub http_timeout: u64,

    /// User-Agent sent to the webhook, `reelflow/<version>` when unset
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    pub user_agent: Option<String>,
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl ReqwestConfig {
    pub fn new(http_timeout: u64) -> Self {
        Self {
            http_timeout,
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_timeout(self, http_timeout: u64) -> Self {
        Self {
            http_timeout,
            ..self
        }
    }

    #[must_use]
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
            ..self
        }
    }

    /// Timeout handed to the client builder.
    pub fn effective_timeout(&self) -> Duration {
        let secs = if self.http_timeout == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            self.http_timeout
        };
        Duration::from_secs(secs)
    }

    /// User-Agent handed to the client builder; blank values count as unset.
    pub fn effective_user_agent(&self) -> String {
        match self.user_agent.as_deref().map(str::trim) {
            Some(agent) if !agent.is_empty() => agent.to_owned(),
            _ => concat!("reelflow/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
