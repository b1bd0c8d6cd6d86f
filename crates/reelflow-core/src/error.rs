//! Error type shared by validation, triggering and configuration.

use std::borrow::Cow;
use std::fmt;

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::ValidationError;

/// Thread-safe boxed cause.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong, independent of the transport that reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Required request fields are missing or invalid.
    Validation,
    /// The automation webhook answered with a failure status.
    Upstream,
    /// The automation webhook could not be reached.
    Transport,
    /// A payload could not be encoded or decoded.
    Serialization,
    /// Startup settings are unusable.
    Configuration,
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns whether correcting the request would fix the error.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Classified error with a caller-safe message and operator-only context.
///
/// Renders as `[kind]` or `[kind]: message`.
#[must_use]
#[derive(Debug, Error)]
pub struct Error {
    pub kind: ErrorKind,
    /// Shown to API callers; never contains addresses or credentials.
    pub message: Option<Cow<'static, str>>,
    /// HTTP status the webhook answered with.
    pub status: Option<u16>,
    /// Offending fields when `kind` is [`ErrorKind::Validation`].
    pub validation: Option<ValidationError>,
    #[source]
    pub source: Option<BoxedError>,
    /// Logged, never returned to callers.
    pub context: Option<Cow<'static, str>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        match &self.message {
            Some(message) => write!(f, ": {message}"),
            None => Ok(()),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            validation: None,
            source: None,
            context: None,
        }
    }

    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// The webhook answered with a non-success `status`.
    pub fn upstream(status: u16) -> Self {
        Self::new(ErrorKind::Upstream).with_status(status)
    }

    pub fn transport() -> Self {
        Self::new(ErrorKind::Transport)
    }

    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    pub fn with_status(self, status: u16) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    pub fn with_source(self, source: impl Into<BoxedError>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    pub fn with_context(self, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        let message = error.to_string();
        Self {
            validation: Some(error),
            ..Self::new(ErrorKind::Validation).with_message(message)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON payload")
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::str::FromStr;

    use super::*;
    use crate::RequestField;

    #[test]
    fn bare_error_has_no_details() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.to_string(), "[unknown]");
        assert!(error.message().is_none());
        assert!(error.status.is_none());
        assert!(error.source().is_none());
    }

    #[test]
    fn upstream_error_keeps_status_and_message() {
        let error = Error::upstream(500)
            .with_message("bad credentials")
            .with_context("n8n webhook");

        assert_eq!(error.kind, ErrorKind::Upstream);
        assert_eq!(error.status, Some(500));
        assert_eq!(error.to_string(), "[upstream]: bad credentials");
        assert_eq!(error.context.as_deref(), Some("n8n webhook"));
    }

    #[test]
    fn source_is_exposed_through_std_error() {
        let error = Error::transport().with_source(std::io::Error::other("refused"));
        assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("refused"));
    }

    #[test]
    fn validation_error_converts() {
        let error = Error::from(ValidationError::missing(vec![RequestField::Topic]));

        assert_eq!(error.kind, ErrorKind::Validation);
        assert_eq!(error.message(), Some("Missing required fields: topic"));
        assert!(error.validation.is_some());
        assert!(error.kind.is_client_error());
    }

    #[test]
    fn json_error_converts() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(json_error);
        assert_eq!(error.kind, ErrorKind::Serialization);
        assert_eq!(error.message(), Some("Invalid JSON payload"));
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!(ErrorKind::from_str("upstream").unwrap(), ErrorKind::Upstream);
        assert_eq!(ErrorKind::from_str("transport").unwrap(), ErrorKind::Transport);
        assert!(ErrorKind::from_str("timeout").is_err());
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
        assert!(!ErrorKind::Upstream.is_client_error());
    }
}
