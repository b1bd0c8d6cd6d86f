#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod service;

pub mod mock;
pub mod response;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use reelflow_core::{AutomationRequest, Error, ErrorKind, Result, ServiceHealth, ServiceStatus};
pub use response::{TriggerResponse, TriggerSource};
pub use service::TriggerService;

/// Tracing target for trigger operations.
pub const TRACING_TARGET: &str = "reelflow_webhook";

/// Core trait for automation trigger operations.
///
/// Implement this trait to plug another automation backend into the server.
#[async_trait::async_trait]
pub trait TriggerProvider: Send + Sync {
    /// Triggers the automation for a validated request.
    async fn trigger(&self, request: &AutomationRequest) -> Result<TriggerResponse>;

    /// Performs a health check on the trigger provider.
    async fn health_check(&self) -> Result<ServiceHealth>;

    /// Returns where this provider's results come from.
    fn source(&self) -> TriggerSource;
}
