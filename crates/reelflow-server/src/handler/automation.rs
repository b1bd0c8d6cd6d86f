//! Automation trigger handlers.
//!
//! Both routes run the same parse-then-validate step. `run_automation`
//! hands the validated request to the configured [`TriggerService`];
//! `preview` returns the payload that would be posted to n8n.

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::post;
use reelflow_core::{AutomationRequest, RawAutomationRequest};
use reelflow_webhook::TriggerService;
use serde_json::Value;

use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for automation operations.
const TRACING_TARGET: &str = "reelflow_server::handler::automation";

/// Response header naming where the result came from (`mock` or `upstream`).
pub const AUTOMATION_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-automation-source");

type SourceHeader = [(HeaderName, HeaderValue); 1];

fn source_header(trigger: &TriggerService) -> SourceHeader {
    let source: &'static str = trigger.source().into();
    [(AUTOMATION_SOURCE_HEADER, HeaderValue::from_static(source))]
}

/// Validates the brief and triggers the automation.
///
/// Returns the provider's result body unchanged.
#[tracing::instrument(skip_all)]
pub async fn run_automation(
    State(trigger): State<TriggerService>,
    Json(raw): Json<RawAutomationRequest>,
) -> Result<(SourceHeader, Json<Value>)> {
    let request = raw.validate()?;

    tracing::info!(
        target: TRACING_TARGET,
        channel_name = request.channel_name(),
        duration = %request.duration_preference(),
        voice = %request.voice_profile(),
        reference_links = request.reference_links().len(),
        "Automation requested"
    );

    let response = trigger.trigger(&request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        request_id = %response.request_id,
        source = %response.source,
        status_code = ?response.status_code,
        "Automation completed"
    );

    Ok((source_header(&trigger), Json(response.body)))
}

/// Validates the brief and returns the normalized n8n payload without
/// triggering anything.
#[tracing::instrument(skip_all)]
pub async fn preview(
    State(trigger): State<TriggerService>,
    Json(raw): Json<RawAutomationRequest>,
) -> Result<(SourceHeader, Json<AutomationRequest>)> {
    let request = raw.validate()?;

    tracing::debug!(
        target: TRACING_TARGET,
        channel_name = request.channel_name(),
        reference_links = request.reference_links().len(),
        "Automation payload previewed"
    );

    Ok((source_header(&trigger), Json(request)))
}

/// Returns a [`Router`] with all automation routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/automation", post(run_automation))
        .route("/api/automation/preview", post(preview))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reelflow_webhook::reqwest::{ReqwestClient, ReqwestConfig};
    use serde_json::json;
    use url::Url;

    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::handler::test::{create_test_server, create_test_server_with_state};
    use crate::middleware::{RecoveryConfig, RouterRecoveryExt};

    fn brief() -> Value {
        json!({
            "channelName": "FutureFrame AI",
            "topic": "How AI voice cloning transforms YouTube content creation",
            "objective": "Educate viewers and drive sign-ups",
            "durationPreference": "mid",
            "callToAction": "Tap the link below to launch your workflow.",
            "voiceProfile": "authoritative",
            "targetAudience": "AI-curious creators",
            "language": "English",
            "referenceLinks": ["  ", "https://a.com", "", "https://b.com | note"],
        })
    }

    fn upstream_state_with_timeout(url: &str, http_timeout: u64) -> ServiceState {
        let endpoint = Url::parse(url).unwrap();
        let client = ReqwestClient::new(endpoint, ReqwestConfig::new(http_timeout)).unwrap();
        ServiceState::new(client.into_service())
    }

    fn upstream_state(url: &str) -> ServiceState {
        upstream_state_with_timeout(url, 2)
    }

    #[tokio::test]
    async fn mock_mode_renders_result() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status_ok();
        assert_eq!(response.header(AUTOMATION_SOURCE_HEADER), "mock");

        let body = response.json::<Value>();
        assert!(body["prompt"].as_str().unwrap().contains("FutureFrame AI"));
        assert!(body["script"].is_string());
        assert!(body["voiceDirection"].is_string());
        assert!(body["workflowSummary"].is_string());
        assert_eq!(body["assets"].as_array().unwrap().len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn mock_mode_is_idempotent() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let first = server.post("/api/automation").json(&brief()).await;
        let second = server.post("/api/automation").json(&brief()).await;
        assert_eq!(first.text(), second.text());
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_listed_in_order() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let mut body = brief();
        body["topic"] = json!("   ");
        body.as_object_mut().unwrap().remove("language");

        let response = server.post("/api/automation").json(&body).await;
        response.assert_status_bad_request();

        let error = response.json::<Value>();
        assert_eq!(error["name"], "validation_error");
        assert_eq!(error["error"], "Missing required fields: topic, language");
        assert_eq!(error["fields"], json!(["topic", "language"]));
        Ok(())
    }

    #[tokio::test]
    async fn empty_body_lists_every_required_field() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.post("/api/automation").json(&json!({})).await;
        response.assert_status_bad_request();

        let error = response.json::<Value>();
        assert_eq!(
            error["error"],
            "Missing required fields: channelName, topic, objective, durationPreference, \
             callToAction, voiceProfile, targetAudience, language"
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/api/automation")
            .text("{\"channelName\": ")
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn preview_returns_normalized_payload() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.post("/api/automation/preview").json(&brief()).await;
        response.assert_status_ok();

        let payload = response.json::<Value>();
        assert_eq!(
            payload["referenceLinks"],
            json!(["https://a.com", "https://b.com | note"])
        );
        assert_eq!(payload["durationPreference"], "mid");
        Ok(())
    }

    #[tokio::test]
    async fn upstream_body_is_returned_unchanged() -> anyhow::Result<()> {
        let mut upstream = mockito::Server::new_async().await;
        let body = json!({"status": "queued", "executionId": "n8n-123"});
        let mock = upstream
            .mock("POST", "/webhook/reelflow")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let state = upstream_state(&format!("{}/webhook/reelflow", upstream.url()));
        let server = create_test_server_with_state(state)?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status_ok();
        assert_eq!(response.header(AUTOMATION_SOURCE_HEADER), "upstream");
        assert_eq!(response.json::<Value>(), body);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn upstream_key_order_is_preserved() -> anyhow::Result<()> {
        let mut upstream = mockito::Server::new_async().await;
        let body = r#"{"zeta":1,"executionId":"n8n-123","alpha":{"b":true,"a":false}}"#;
        let _mock = upstream
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let server = create_test_server_with_state(upstream_state(&upstream.url()))?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status_ok();
        assert_eq!(response.text(), body);
        Ok(())
    }

    #[tokio::test]
    async fn hung_webhook_is_a_gateway_error_not_a_timeout() -> anyhow::Result<()> {
        // Connections complete in the backlog but nothing ever answers.
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let state = upstream_state_with_timeout(&format!("http://127.0.0.1:{port}/webhook"), 1);
        let app = routes()
            .with_state(state)
            .with_recovery(&RecoveryConfig::with_timeout_secs(3));
        let server = TestServer::new(app)?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let error = response.json::<Value>();
        assert_eq!(error["name"], "bad_gateway");
        assert_eq!(error["error"], "Unable to trigger automation");
        drop(listener);
        Ok(())
    }

    #[tokio::test]
    async fn upstream_error_message_is_forwarded() -> anyhow::Result<()> {
        let mut upstream = mockito::Server::new_async().await;
        let _mock = upstream
            .mock("POST", "/")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"bad credentials"}"#)
            .create_async()
            .await;

        let server = create_test_server_with_state(upstream_state(&upstream.url()))?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let error = response.json::<Value>();
        assert_eq!(error["name"], "bad_gateway");
        assert_eq!(error["error"], "bad credentials");
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_upstream_hides_details() -> anyhow::Result<()> {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0")?;
            listener.local_addr()?.port()
        };

        let state = upstream_state(&format!("http://127.0.0.1:{port}/webhook"));
        let server = create_test_server_with_state(state)?;

        let response = server.post("/api/automation").json(&brief()).await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

        let text = response.text();
        assert!(text.contains("Unable to trigger automation"));
        assert!(!text.contains("127.0.0.1"));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_upstream() -> anyhow::Result<()> {
        let mut upstream = mockito::Server::new_async().await;
        let mock = upstream
            .mock("POST", "/")
            .expect(0)
            .create_async()
            .await;

        let server = create_test_server_with_state(upstream_state(&upstream.url()))?;

        let response = server.post("/api/automation").json(&json!({"topic": "x"})).await;
        response.assert_status_bad_request();
        mock.assert_async().await;
        Ok(())
    }
}
