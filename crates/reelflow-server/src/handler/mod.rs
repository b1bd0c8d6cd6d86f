//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use reelflow_server::handler::routes;
//! use reelflow_server::service::ServiceState;
//!
//! let state = ServiceState::mock();
//! let app: axum::Router = routes().with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod automation;
mod error;
mod monitors;
mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::automation::{AUTOMATION_SOURCE_HEADER, preview, run_automation};
pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, HealthResponse};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes and the JSON `404` fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(automation::routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Returns a new [`TestServer`] with the default router and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] in mock mode.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(ServiceState::mock())
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn middleware_stack_wraps_routes() -> anyhow::Result<()> {
        use crate::middleware::{
            REQUEST_ID_HEADER, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
        };

        let app = routes()
            .with_state(ServiceState::mock())
            .with_default_security()
            .with_observability()
            .with_default_recovery();
        let server = TestServer::new(app)?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(!response.header(REQUEST_ID_HEADER).is_empty());
        assert_eq!(
            response.header(axum::http::header::X_CONTENT_TYPE_OPTIONS),
            "nosniff"
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/unknown").await;
        response.assert_status_not_found();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
