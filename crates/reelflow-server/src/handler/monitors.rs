//! System health monitoring handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use jiff::Timestamp;
use reelflow_core::ServiceStatus;
use reelflow_webhook::TriggerService;

use crate::extract::Json;
use crate::handler::ErrorKind;
use crate::handler::response::HealthResponse;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "reelflow_server::handler::monitors";

/// Reports the trigger mode and provider health.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(trigger): State<TriggerService>,
) -> (StatusCode, Json<HealthResponse>) {
    let source = trigger.source();

    let (status, message) = match trigger.health_check().await {
        Ok(health) => (health.status, health.message),
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "Trigger provider health check failed"
            );
            (ServiceStatus::Unhealthy, error.message().map(str::to_owned))
        }
    };

    let status_code = match status {
        ServiceStatus::Unhealthy => ErrorKind::ServiceUnavailable.status_code(),
        ServiceStatus::Healthy | ServiceStatus::Degraded => StatusCode::OK,
    };

    tracing::debug!(
        target: TRACING_TARGET,
        source = %source,
        status = ?status,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    let response = HealthResponse {
        status,
        source,
        webhook_configured: !trigger.is_mock(),
        message,
        version: env!("CARGO_PKG_VERSION").to_owned(),
        checked_at: Timestamp::now(),
    };

    (status_code, Json(response))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
