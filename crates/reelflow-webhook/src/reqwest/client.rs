//! Reqwest-based HTTP client for triggering the n8n workflow.

use std::sync::Arc;

use jiff::Timestamp;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use super::{Error, REQUEST_ID_HEADER, ReqwestConfig, TRACING_TARGET};
use crate::{
    AutomationRequest, ServiceHealth, TriggerProvider, TriggerResponse, TriggerService,
    TriggerSource,
};

/// Inner client that holds the HTTP client, endpoint and configuration.
struct ReqwestClientInner {
    http: Client,
    endpoint: Url,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client that posts automation requests to an n8n webhook.
///
/// One POST per trigger, no retries. The upstream JSON body is returned
/// unchanged on success.
///
/// # Examples
///
/// ```rust,ignore
/// use reelflow_webhook::reqwest::{ReqwestClient, ReqwestConfig};
/// use url::Url;
///
/// let endpoint = Url::parse("https://n8n.example.com/webhook/reelflow")?;
/// let client = ReqwestClient::new(endpoint, ReqwestConfig::default())?;
/// let response = client.trigger(&request).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client for the given webhook endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not `http` or
    /// `https`, or if the underlying HTTP client cannot be built.
    pub fn new(endpoint: Url, config: ReqwestConfig) -> crate::Result<Self> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme(endpoint.scheme().to_owned()).into());
        }

        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            host = endpoint.host_str(),
            timeout_ms = timeout.as_millis(),
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                crate::Error::configuration()
                    .with_message("Failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = ReqwestClientInner {
            http,
            endpoint,
            config,
        };

        tracing::info!(
            target: TRACING_TARGET,
            host = inner.endpoint.host_str(),
            "Automation webhook client created"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the webhook endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into a [`TriggerService`] for use with dependency injection.
    pub fn into_service(self) -> TriggerService {
        TriggerService::new(self)
    }

    /// Posts the request and classifies the response.
    async fn post(&self, request_id: Uuid, payload: Vec<u8>) -> super::Result<(u16, Value)> {
        let http_response = self
            .http()
            .post(self.endpoint().clone())
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .body(payload)
            .send()
            .await?;

        let status = http_response.status();
        let bytes = http_response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                message: upstream_message(&bytes),
            });
        }

        let body = serde_json::from_slice(&bytes).map_err(|source| Error::InvalidBody {
            status: status.as_u16(),
            source,
        })?;

        Ok((status.as_u16(), body))
    }
}

/// Extracts the `error` or `message` string from a JSON error body.
fn upstream_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .into_iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_owned)
}

#[async_trait::async_trait]
impl TriggerProvider for ReqwestClient {
    async fn trigger(&self, request: &AutomationRequest) -> crate::Result<TriggerResponse> {
        let started_at = Timestamp::now();
        let request_id = Uuid::now_v7();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            host = self.endpoint().host_str(),
            "Posting automation request to webhook"
        );

        let payload = serde_json::to_vec(request).map_err(Error::Serde)?;
        let result = self.post(request_id, payload).await;

        let (status_code, body) = match result {
            Ok(ok) => ok,
            Err(Error::Reqwest(e)) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request_id,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    error = %e,
                    "Automation webhook unreachable"
                );
                return Err(Error::Reqwest(e).into());
            }
            Err(error) => return Err(error.into()),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            status_code,
            "Automation webhook responded"
        );

        Ok(TriggerResponse::upstream(
            request_id,
            status_code,
            body,
            started_at,
        ))
    }

    async fn health_check(&self) -> crate::Result<ServiceHealth> {
        // No probe request: the webhook would start a workflow run.
        Ok(ServiceHealth::healthy().with_detail("mode", <&str>::from(TriggerSource::Upstream)))
    }

    fn source(&self) -> TriggerSource {
        TriggerSource::Upstream
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use mockito::Matcher;
    use reelflow_core::RawAutomationRequest;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn request() -> AutomationRequest {
        let raw: RawAutomationRequest = serde_json::from_value(json!({
            "channelName": "FutureFrame AI",
            "topic": "AI voice cloning",
            "objective": "Drive sign-ups",
            "durationPreference": "short",
            "callToAction": "Tap the link below",
            "voiceProfile": "friendly",
            "targetAudience": "Creators",
            "language": "English",
            "referenceLinks": ["https://openai.com | GPT-4o launch"],
        }))
        .unwrap();
        raw.validate().unwrap()
    }

    fn client(url: &str) -> ReqwestClient {
        let endpoint = Url::parse(url).unwrap();
        ReqwestClient::new(endpoint, ReqwestConfig::new(2)).unwrap()
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let endpoint = Url::parse("file:///tmp/hook").unwrap();
        let error = ReqwestClient::new(endpoint, ReqwestConfig::default()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_upstream_message() {
        assert_eq!(
            upstream_message(br#"{"error":"bad credentials"}"#).as_deref(),
            Some("bad credentials")
        );
        assert_eq!(
            upstream_message(br#"{"message":"Workflow not active"}"#).as_deref(),
            Some("Workflow not active")
        );
        assert_eq!(
            upstream_message(br#"{"error":"","message":"fallback"}"#).as_deref(),
            Some("fallback")
        );
        assert!(upstream_message(br#"{"error":{"code":1}}"#).is_none());
        assert!(upstream_message(b"Internal Server Error").is_none());
    }

    #[tokio::test]
    async fn test_posts_payload_and_returns_body_unchanged() {
        let mut server = mockito::Server::new_async().await;
        let upstream = json!({
            "prompt": "from n8n",
            "executionId": 42,
            "extra": {"nested": [1, 2, 3]},
        });
        let mock = server
            .mock("POST", "/webhook/reelflow")
            .match_header("content-type", "application/json")
            .match_header(REQUEST_ID_HEADER, Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "channelName": "FutureFrame AI",
                "durationPreference": "short",
                "referenceLinks": ["https://openai.com | GPT-4o launch"],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(upstream.to_string())
            .expect(1)
            .create_async()
            .await;

        let client = client(&format!("{}/webhook/reelflow", server.url()));
        let response = client.trigger(&request()).await.unwrap();

        assert_eq!(response.source, TriggerSource::Upstream);
        assert_eq!(response.status_code, Some(200));
        assert_eq!(response.body, upstream);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"bad credentials"}"#)
            .expect(1)
            .create_async()
            .await;

        let error = client(&server.url())
            .trigger(&request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Upstream);
        assert_eq!(error.status, Some(500));
        assert_eq!(error.message(), Some("bad credentials"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_plain_error_body_uses_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let error = client(&server.url())
            .trigger(&request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Upstream);
        assert_eq!(
            error.message(),
            Some("Automation service responded with status 404")
        );
    }

    #[tokio::test]
    async fn test_non_json_success_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("Workflow was started")
            .create_async()
            .await;

        let error = client(&server.url())
            .trigger(&request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Upstream);
        assert_eq!(error.status, Some(200));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let error = client(&format!("http://127.0.0.1:{port}/webhook"))
            .trigger(&request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Transport);
        assert_eq!(error.message(), Some("Unable to trigger automation"));
        assert!(error.source.is_some());
        assert!(!error.to_string().contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let health = client("https://n8n.example.com/webhook")
            .health_check()
            .await
            .unwrap();
        assert!(health.is_operational());
        assert_eq!(health.details["mode"], "upstream");
    }
}
