//! Trigger service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::mock::MockClient;
use crate::{
    AutomationRequest, Result, ServiceHealth, TRACING_TARGET, TriggerProvider, TriggerResponse,
    TriggerSource,
};

/// Trigger service wrapper with observability.
///
/// This wrapper adds structured logging to any trigger implementation.
/// The inner provider is wrapped in `Arc` for cheap cloning into handlers.
#[derive(Clone)]
pub struct TriggerService {
    inner: Arc<dyn TriggerProvider>,
}

impl fmt::Debug for TriggerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerService")
            .field("source", &self.inner.source())
            .finish_non_exhaustive()
    }
}

impl TriggerService {
    /// Creates a new trigger service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: TriggerProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a service that renders results locally.
    pub fn mock() -> Self {
        Self::new(MockClient::new())
    }

    /// Selects the provider for the configured endpoint.
    ///
    /// Without an endpoint the service runs in mock mode; otherwise every
    /// trigger is posted to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not an `http` or
    /// `https` URL, or if the HTTP client cannot be built.
    #[cfg(feature = "reqwest")]
    #[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
    pub fn from_endpoint(
        endpoint: Option<url::Url>,
        config: crate::reqwest::ReqwestConfig,
    ) -> Result<Self> {
        match endpoint {
            None => {
                tracing::info!(
                    target: TRACING_TARGET,
                    "No automation webhook configured, using mock results"
                );
                Ok(Self::mock())
            }
            Some(endpoint) => {
                let client = crate::reqwest::ReqwestClient::new(endpoint, config)?;
                Ok(client.into_service())
            }
        }
    }

    /// Triggers the automation for a validated request.
    pub async fn trigger(&self, request: &AutomationRequest) -> Result<TriggerResponse> {
        let started_at = Instant::now();
        let source = self.inner.source();

        tracing::debug!(
            target: TRACING_TARGET,
            source = %source,
            channel_name = request.channel_name(),
            reference_links = request.reference_links().len(),
            "Triggering automation"
        );

        let result = self.inner.trigger(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %response.request_id,
                    response_id = %response.response_id,
                    source = %response.source,
                    status_code = ?response.status_code,
                    duration = %response.duration(),
                    "Automation triggered successfully"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    source = %source,
                    kind = %error.kind,
                    status_code = ?error.status,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Automation trigger failed"
                );
            }
        }

        result
    }

    /// Performs a health check on the underlying provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }

    /// Returns where this service's results come from.
    pub fn source(&self) -> TriggerSource {
        self.inner.source()
    }

    /// Returns whether no webhook is configured.
    pub fn is_mock(&self) -> bool {
        self.source() == TriggerSource::Mock
    }
}

impl Default for TriggerService {
    fn default() -> Self {
        Self::mock()
    }
}
