//! Handler error carrying an [`ErrorKind`] and the body it renders.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Error returned from handlers and extractors.
///
/// Starts from the canned body of its kind; the builder methods override or
/// extend that body.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    body: ErrorResponse<'a>,
}

impl Error<'static> {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            body: kind.response(),
        }
    }
}

impl<'a> Error<'a> {
    fn map_body(self, f: impl FnOnce(ErrorResponse<'a>) -> ErrorResponse<'a>) -> Self {
        Self {
            kind: self.kind,
            body: f(self.body),
        }
    }

    /// Adds detail that is logged but never sent to the client.
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        self.map_body(|body| body.with_context(context))
    }

    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        self.map_body(|body| body.with_message(message))
    }

    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.map_body(|body| body.with_resource(resource))
    }

    pub fn with_suggestion(self, suggestion: impl Into<Cow<'a, str>>) -> Self {
        self.map_body(|body| body.with_suggestion(suggestion))
    }

    pub fn with_fields(self, fields: impl IntoIterator<Item = &'static str>) -> Self {
        self.map_body(|body| body.with_fields(fields))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the client-visible message, defaulting to the kind's.
    pub fn message(&self) -> &str {
        &self.body.message
    }

    pub fn context(&self) -> Option<&str> {
        self.body.context.as_deref()
    }

    pub fn resource(&self) -> Option<&str> {
        self.body.resource.as_deref()
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.body.suggestion.as_deref()
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.body.fields
    }
}

impl Default for Error<'static> {
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("status", &self.body.status)
            .field("message", &self.body.message)
            .field("context", &self.body.context)
            .field("fields", &self.body.fields)
            .finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ErrorResponse {
            name,
            message,
            context,
            status,
            ..
        } = &self.body;
        write!(f, "{name} ({}): {message}", status.as_u16())?;
        match context {
            Some(context) => write!(f, " ({context})"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.body.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Handler result defaulting to [`Error`].
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Failure classes the API reports, one per status/name pair.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Body is not a JSON object or cannot be read.
    BadRequest,
    /// Required request fields are missing or invalid.
    ValidationError,
    NotFound,
    PayloadTooLarge,
    #[default]
    InternalServerError,
    /// The automation webhook failed or could not be reached.
    BadGateway,
    ServiceUnavailable,
    /// The inbound request outlived the recovery timeout.
    GatewayTimeout,
}

impl ErrorKind {
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the canned body for this kind.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::ValidationError => ErrorResponse::VALIDATION_ERROR,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::BadGateway => ErrorResponse::BAD_GATEWAY,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout => ErrorResponse::GATEWAY_TIMEOUT,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 8] = [
        ErrorKind::BadRequest,
        ErrorKind::ValidationError,
        ErrorKind::NotFound,
        ErrorKind::PayloadTooLarge,
        ErrorKind::InternalServerError,
        ErrorKind::BadGateway,
        ErrorKind::ServiceUnavailable,
        ErrorKind::GatewayTimeout,
    ];

    #[test]
    fn default_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), "Internal server error.");
    }

    #[test]
    fn builders_override_the_canned_body() {
        let error = ErrorKind::BadGateway
            .with_message("bad credentials")
            .with_resource("automation")
            .with_context("upstream status 500");

        assert_eq!(error.kind(), ErrorKind::BadGateway);
        assert_eq!(error.message(), "bad credentials");
        assert_eq!(error.resource(), Some("automation"));
        assert_eq!(error.context(), Some("upstream status 500"));
    }

    #[test]
    fn fields_are_kept_in_order() {
        let error = ErrorKind::ValidationError
            .into_error()
            .with_fields(["topic", "language"]);
        assert_eq!(error.fields(), ["topic", "language"]);
    }

    #[test]
    fn display_includes_name_status_and_context() {
        let error = ErrorKind::NotFound.with_context("GET /missing");
        assert_eq!(
            error.to_string(),
            "not_found (404): Resource not found. (GET /missing)"
        );
    }

    #[test]
    fn borrowed_message_is_accepted() {
        let message = String::from("Request body too large");
        let error = ErrorKind::PayloadTooLarge.with_message(message.as_str());
        assert_eq!(error.message(), "Request body too large");
    }

    #[test]
    fn every_kind_maps_to_an_error_status() {
        for kind in ALL_KINDS {
            let status = kind.status_code();
            assert!(status.is_client_error() || status.is_server_error(), "{kind}");
            assert_eq!(kind.into_response().status(), status);
        }
    }

    #[test]
    fn gateway_and_validation_statuses() {
        assert_eq!(ErrorKind::BadGateway.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ErrorKind::ValidationError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorKind::GatewayTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }
}
