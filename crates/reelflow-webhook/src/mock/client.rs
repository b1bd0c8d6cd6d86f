//! Template-backed mock client.

use jiff::Timestamp;
use reelflow_core::template;
use uuid::Uuid;

use super::TRACING_TARGET;
use crate::{
    AutomationRequest, Error, Result, ServiceHealth, TriggerProvider, TriggerResponse,
    TriggerService, TriggerSource,
};

/// Trigger provider that renders results locally.
///
/// Output depends only on the request: identical requests produce identical
/// bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockClient;

impl MockClient {
    /// Creates a new mock client.
    pub fn new() -> Self {
        Self
    }

    /// Converts this client into a [`TriggerService`] for use with dependency injection.
    pub fn into_service(self) -> TriggerService {
        TriggerService::new(self)
    }
}

#[async_trait::async_trait]
impl TriggerProvider for MockClient {
    async fn trigger(&self, request: &AutomationRequest) -> Result<TriggerResponse> {
        let started_at = Timestamp::now();
        let request_id = Uuid::now_v7();

        let result = template::render(request);
        let body = serde_json::to_value(&result).map_err(|e| {
            Error::from(e).with_message("Failed to serialize mock automation result")
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            assets = result.assets.len(),
            "Rendered mock automation result"
        );

        Ok(TriggerResponse::mock(request_id, body, started_at))
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::degraded("No automation webhook configured, serving mock results")
            .with_detail("mode", <&str>::from(TriggerSource::Mock)))
    }

    fn source(&self) -> TriggerSource {
        TriggerSource::Mock
    }
}

#[cfg(test)]
mod tests {
    use reelflow_core::{AutomationResult, RawAutomationRequest};
    use serde_json::json;

    use super::*;
    use crate::ServiceStatus;

    fn request() -> AutomationRequest {
        let raw: RawAutomationRequest = serde_json::from_value(json!({
            "channelName": "FutureFrame AI",
            "topic": "AI voice cloning",
            "objective": "Drive sign-ups",
            "durationPreference": "long",
            "callToAction": "Subscribe for weekly breakdowns",
            "voiceProfile": "calm",
            "targetAudience": "Indie creators",
            "language": "English",
            "referenceLinks": "https://openai.com | launch notes",
        }))
        .unwrap();
        raw.validate().unwrap()
    }

    #[tokio::test]
    async fn test_trigger_renders_templates() {
        let request = request();
        let response = MockClient::new().trigger(&request).await.unwrap();

        assert!(response.is_mock());
        assert!(response.status_code.is_none());

        let result: AutomationResult = serde_json::from_value(response.body).unwrap();
        assert_eq!(result, template::render(&request));
    }

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let request = request();
        let client = MockClient::new();

        let first = client.trigger(&request).await.unwrap();
        let second = client.trigger(&request).await.unwrap();

        assert_eq!(first.body, second.body);
        assert_ne!(first.response_id, second.response_id);
    }

    #[tokio::test]
    async fn test_body_uses_wire_names() {
        let response = MockClient::new().trigger(&request()).await.unwrap();
        let body = response.body.as_object().unwrap();

        for key in ["prompt", "script", "voiceDirection", "workflowSummary", "assets"] {
            assert!(body.contains_key(key), "missing {key}");
        }
    }

    #[tokio::test]
    async fn test_health_check_reports_mock_mode() {
        let health = MockClient::new().health_check().await.unwrap();
        assert_eq!(health.status, ServiceStatus::Degraded);
        assert_eq!(health.details["mode"], "mock");
    }
}
