//! Offline trigger provider.
//!
//! Used when no n8n webhook is configured: results are rendered from the
//! templates in [`reelflow_core::template`] and never touch the network.

mod client;

pub use client::MockClient;

/// Tracing target for mock trigger operations.
pub const TRACING_TARGET: &str = "reelflow_webhook::mock";
