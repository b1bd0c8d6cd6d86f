use jiff::Timestamp;
use reelflow_core::ServiceStatus;
use reelflow_webhook::TriggerSource;
use serde::{Deserialize, Serialize};

/// Health status of the service and its trigger provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall status of the trigger provider.
    pub status: ServiceStatus,
    /// Where automation results come from.
    pub source: TriggerSource,
    /// Whether an n8n webhook is configured.
    pub webhook_configured: bool,
    /// Provider message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server version.
    pub version: String,
    /// Timestamp of the check.
    pub checked_at: Timestamp,
}
