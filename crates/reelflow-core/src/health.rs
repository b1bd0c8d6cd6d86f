//! Provider health reports.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Whether a trigger provider can run automations right now.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Healthy,
    /// Requests succeed but results are not produced by the real workflow.
    Degraded,
    Unhealthy,
}

/// Point-in-time health of a trigger provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: ServiceStatus,
    /// Human-readable explanation for non-healthy states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub checked_at: Timestamp,
    /// Provider-specific facts such as the trigger mode.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ServiceHealth {
    fn new(status: ServiceStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            checked_at: Timestamp::now(),
            details: BTreeMap::new(),
        }
    }

    pub fn healthy() -> Self {
        Self::new(ServiceStatus::Healthy, None)
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self::new(ServiceStatus::Degraded, Some(message.into()))
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::new(ServiceStatus::Unhealthy, Some(message.into()))
    }

    /// Records a provider detail, replacing any previous value for `key`.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns whether automations can still be triggered.
    pub fn is_operational(&self) -> bool {
        self.status != ServiceStatus::Unhealthy
    }
}
