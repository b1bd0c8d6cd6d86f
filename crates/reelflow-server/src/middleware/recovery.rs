//! Request timeout and panic recovery.
//!
//! An automation request that outlives [`RecoveryConfig::request_timeout`]
//! answers `504 gateway_timeout`; a panicking handler answers `500` without
//! leaking the panic payload.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use futures::future::{BoxFuture, FutureExt, ready};
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "reelflow_server::middleware::recovery";

/// Kept above the default webhook timeout; a hung webhook must fail the
/// outbound call before this layer answers 504.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds an inbound request may run before it is answered with 504
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

impl RecoveryConfig {
    pub fn with_timeout_secs(request_timeout: u64) -> Self {
        Self { request_timeout }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Adds timeout and panic recovery to a [`Router`].
pub trait RouterRecoveryExt<S> {
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(on_service_error))
                .layer(CatchPanicLayer::custom(on_panic))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

fn on_service_error(err: BoxError) -> BoxFuture<'static, Response> {
    let error = if err.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET, "Request exceeded the timeout");
        ErrorKind::GatewayTimeout.with_context("request timeout exceeded")
    } else {
        tracing::error!(target: TRACING_TARGET, error = %err, "Middleware failed");
        ErrorKind::InternalServerError.with_context(err.to_string())
    };

    ready(error.into_response()).boxed()
}

fn on_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(target: TRACING_TARGET, %error, "Handler panicked with an error");
        return error.clone().into_response();
    }

    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(target: TRACING_TARGET, panic = message, "Handler panicked");

    ErrorKind::InternalServerError.into_response()
}
