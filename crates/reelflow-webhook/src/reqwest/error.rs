//! Error types for reqwest-based webhook calls.

use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to callers when the webhook cannot be reached.
const TRANSPORT_MESSAGE: &str = "Unable to trigger automation";

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Payload serialization failed.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The webhook answered with a non-success status.
    #[error("Automation service responded with status {status}")]
    Status {
        status: u16,
        /// `error` or `message` field of a JSON error body.
        message: Option<String>,
    },
    /// The webhook answered with success but the body is not JSON.
    #[error("Automation service returned an invalid response (status {status})")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    /// The configured endpoint cannot be used.
    #[error("Unsupported webhook URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

impl From<Error> for crate::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                let context = if e.is_timeout() {
                    "webhook request timed out"
                } else if e.is_connect() {
                    "webhook connection failed"
                } else {
                    "webhook request failed"
                };

                crate::Error::transport()
                    .with_message(TRANSPORT_MESSAGE)
                    .with_context(context)
                    .with_source(e)
            }
            Error::Serde(e) => crate::Error::serialization()
                .with_message("Failed to serialize automation request")
                .with_source(e),
            Error::Status { status, message } => {
                let fallback = format!("Automation service responded with status {status}");
                crate::Error::upstream(status).with_message(message.unwrap_or(fallback))
            }
            Error::InvalidBody { status, source } => crate::Error::upstream(status)
                .with_message("Automation service returned an invalid response")
                .with_source(source),
            Error::UnsupportedScheme(scheme) => crate::Error::configuration().with_message(
                format!("Unsupported webhook URL scheme '{scheme}', expected http or https"),
            ),
        }
    }
}
