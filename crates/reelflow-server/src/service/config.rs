//! Service configuration.

#[cfg(feature = "config")]
use clap::Args;
use reelflow_core::{Error, Result};
use reelflow_webhook::reqwest::ReqwestConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// n8n webhook that runs the automation (unset renders mock results)
    #[cfg_attr(feature = "config", arg(long, env = "N8N_WEBHOOK_URL"))]
    #[serde(default)]
    pub n8n_webhook_url: Option<String>,

    /// HTTP client settings for webhook calls.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[serde(default)]
    pub http_client: ReqwestConfig,
}

impl ServiceConfig {
    /// Sets the webhook URL.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.n8n_webhook_url = Some(url.into());
        self
    }

    /// Sets the HTTP client settings.
    pub fn with_http_client(mut self, http_client: ReqwestConfig) -> Self {
        self.http_client = http_client;
        self
    }

    /// Returns whether a non-blank webhook URL is configured.
    pub fn is_webhook_configured(&self) -> bool {
        self.n8n_webhook_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Parses the webhook URL; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL cannot be parsed.
    pub fn webhook_url(&self) -> Result<Option<Url>> {
        let Some(url) = self
            .n8n_webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Ok(None);
        };

        Url::parse(url).map(Some).map_err(|error| {
            Error::configuration()
                .with_message("Invalid N8N_WEBHOOK_URL")
                .with_source(error)
        })
    }
}
