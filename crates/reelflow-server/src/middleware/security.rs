//! Browser-facing protections: CORS, body limit, compression and
//! response hardening headers.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::extract::MAX_JSON_PAYLOAD_SIZE;
use crate::handler::AUTOMATION_SOURCE_HEADER;
use crate::middleware::REQUEST_ID_HEADER;

const TRACING_TARGET: &str = "reelflow_server::middleware::security";

/// Local dev servers of the studio frontend.
const DEVELOPMENT_ORIGINS: [&str; 5] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Set on every response, replacing any value a handler wrote.
const HARDENING_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Adds the security layers to a [`Router`].
pub trait RouterSecurityExt<S> {
    fn with_security(self, cors: &CorsConfig) -> Self;

    /// Same as [`with_security`](Self::with_security) with
    /// [`CorsConfig::default`].
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig) -> Self {
        let router = self
            .layer(DefaultBodyLimit::max(MAX_JSON_PAYLOAD_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors.layer());

        HARDENING_HEADERS
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(
                    name,
                    HeaderValue::from_static(value),
                ))
            })
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Comma-separated origins allowed to call the API (localhost when empty)
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-origins", env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Seconds browsers may cache a preflight response
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value_t = 3600)
    )]
    pub max_age_seconds: u64,

    /// Allow cookies and authorization headers on cross-origin requests
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-allow-credentials", env = "CORS_ALLOW_CREDENTIALS")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Parses the configured origins, skipping (and warning about) values
    /// that are not valid header values.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return DEVELOPMENT_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        let mut origins = Vec::with_capacity(self.allowed_origins.len());
        for origin in &self.allowed_origins {
            match HeaderValue::from_str(origin.trim()) {
                Ok(value) => origins.push(value),
                Err(_) => tracing::warn!(
                    target: TRACING_TARGET,
                    %origin,
                    "Ignoring invalid CORS origin"
                ),
            }
        }
        origins
    }

    fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.to_header_values())
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, REQUEST_ID_HEADER])
            .expose_headers([REQUEST_ID_HEADER, AUTOMATION_SOURCE_HEADER])
            .allow_credentials(self.allow_credentials)
            .max_age(self.max_age())
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn default_origins_are_local() {
        let origins = CorsConfig::default().to_header_values();
        assert_eq!(origins.len(), 5);
        assert_eq!(origins[0], "http://localhost:3000");
    }

    #[test]
    fn configured_origins_replace_defaults() {
        let config = CorsConfig {
            allowed_origins: vec![" https://studio.example.com ".to_owned(), "bad\norigin".to_owned()],
            ..CorsConfig::default()
        };
        let origins = config.to_header_values();
        assert_eq!(origins, vec![HeaderValue::from_static("https://studio.example.com")]);
    }

    #[tokio::test]
    async fn security_headers_are_set() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_default_security();
        let server = TestServer::new(app)?;

        let response = server.get("/").await;
        response.assert_status_ok();
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
        assert_eq!(
            response.header(header::REFERRER_POLICY),
            "strict-origin-when-cross-origin"
        );
        Ok(())
    }
}
