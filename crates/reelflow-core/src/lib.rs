#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;
mod request;
mod result;
mod validation;

pub mod template;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
pub use request::{
    AutomationRequest, DurationPreference, RawAutomationRequest, ReferenceLink, VoiceProfile,
};
pub use result::{AutomationResult, RecommendedAsset};
pub use validation::{RequestField, ValidationError};

/// Tracing target for validation operations.
pub const TRACING_TARGET_VALIDATION: &str = "reelflow_core::validation";
