//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is an extension trait on [`Router`]:
//!
//! ```rust,no_run
//! use axum::Router;
//! use reelflow_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```
//!
//! [`Router`]: axum::Router

mod observability;
mod recovery;
mod security;

pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
