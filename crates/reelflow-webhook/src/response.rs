//! Trigger response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// Origin of an automation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TriggerSource {
    /// Rendered locally from templates.
    Mock,
    /// Returned by the n8n webhook.
    Upstream,
}

/// Outcome of a single trigger invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    /// Unique identifier for this response.
    pub response_id: Uuid,
    /// Request ID sent to the automation service.
    pub request_id: Uuid,
    /// Where the body came from.
    pub source: TriggerSource,
    /// HTTP status code from the webhook (absent for mock results).
    pub status_code: Option<u16>,
    /// Timestamp when the trigger started.
    pub started_at: Timestamp,
    /// Timestamp when the result was available.
    pub finished_at: Timestamp,
    /// Result body returned to the caller as-is.
    pub body: Value,
}

impl TriggerResponse {
    /// Creates a response for a locally rendered result.
    pub fn mock(request_id: Uuid, body: Value, started_at: Timestamp) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            request_id,
            source: TriggerSource::Mock,
            status_code: None,
            started_at,
            finished_at: Timestamp::now(),
            body,
        }
    }

    /// Creates a response for a successful webhook call.
    pub fn upstream(request_id: Uuid, status_code: u16, body: Value, started_at: Timestamp) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            request_id,
            source: TriggerSource::Upstream,
            status_code: Some(status_code),
            started_at,
            finished_at: Timestamp::now(),
            body,
        }
    }

    /// Returns whether the result was rendered locally.
    pub fn is_mock(&self) -> bool {
        self.source == TriggerSource::Mock
    }

    /// Calculates the trigger time as a duration.
    pub fn duration(&self) -> jiff::Span {
        self.started_at.until(self.finished_at).unwrap_or_default()
    }
}
