//! Reqwest-based HTTP client for the n8n webhook.
//!
//! This module provides a reqwest-based implementation of the [`TriggerProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelflow_webhook::reqwest::{ReqwestClient, ReqwestConfig};
//! use reelflow_webhook::TriggerService;
//! use url::Url;
//!
//! let endpoint = Url::parse("https://n8n.example.com/webhook/reelflow")?;
//! let client = ReqwestClient::new(endpoint, ReqwestConfig::default())?;
//!
//! // Convert to a service for dependency injection
//! let service: TriggerService = client.into_service();
//! ```
//!
//! [`TriggerProvider`]: crate::TriggerProvider

mod client;
mod config;
mod error;

pub use client::ReqwestClient;
pub use config::{DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "reelflow_webhook::reqwest";

/// Header carrying the trigger's request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
