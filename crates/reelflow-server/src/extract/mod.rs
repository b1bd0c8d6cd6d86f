//! Request extractors with improved error handling.
//!
//! These extractors are drop-in replacements for their `axum` counterparts
//! that reject with the server's JSON error body instead of plain text.

mod enhanced_json;

pub use self::enhanced_json::{Json, MAX_JSON_PAYLOAD_SIZE};
