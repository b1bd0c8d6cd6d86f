use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const TRACING_TARGET: &str = "reelflow_server::handler::response";

/// JSON body returned with every non-2xx status.
///
/// `context` and `status` never leave the process: the first is logged when
/// the response is rendered and the second becomes the status line.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// Stable snake_case identifier, e.g. `validation_error`.
    pub name: Cow<'a, str>,
    /// Human-readable explanation.
    #[serde(rename = "error")]
    pub message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Cow<'a, str>>,
    /// Offending request fields in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,

    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    #[serde(skip)]
    pub status: StatusCode,
}

macro_rules! canned_responses {
    ($($ident:ident => $status:ident, $name:literal, $message:literal;)+) => {
        impl ErrorResponse<'static> {
            $(
                pub const $ident: Self = Self::new(StatusCode::$status, $name, $message);
            )+
        }
    };
}

canned_responses! {
    BAD_REQUEST => BAD_REQUEST, "bad_request", "Invalid request data.";
    VALIDATION_ERROR => BAD_REQUEST, "validation_error", "Validation failed.";
    NOT_FOUND => NOT_FOUND, "not_found", "Resource not found.";
    PAYLOAD_TOO_LARGE => PAYLOAD_TOO_LARGE, "payload_too_large", "Payload too large.";
    INTERNAL_SERVER_ERROR => INTERNAL_SERVER_ERROR, "internal_server_error", "Internal server error.";
    BAD_GATEWAY => BAD_GATEWAY, "bad_gateway", "Unable to trigger automation";
    SERVICE_UNAVAILABLE => SERVICE_UNAVAILABLE, "service_unavailable", "Service unavailable.";
    GATEWAY_TIMEOUT => GATEWAY_TIMEOUT, "gateway_timeout", "Request timed out.";
}

impl<'a> ErrorResponse<'a> {
    pub const fn new(status: StatusCode, name: &'a str, message: &'a str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            suggestion: None,
            fields: Vec::new(),
            context: None,
            status,
        }
    }

    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    pub fn with_suggestion(self, suggestion: impl Into<Cow<'a, str>>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn with_fields(self, fields: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }

    /// Appends operator-only context, joining repeated calls with `; `.
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        let context = match self.context {
            Some(existing) => Cow::Owned(format!("{existing}; {}", context.into())),
            None => context.into(),
        };
        Self {
            context: Some(context),
            ..self
        }
    }
}

impl Default for ErrorResponse<'_> {
    fn default() -> Self {
        ErrorResponse::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        tracing::warn!(
            target: TRACING_TARGET,
            status = self.status.as_u16(),
            name = %self.name,
            error = %self.message,
            fields = ?self.fields,
            context = self.context.as_deref().unwrap_or_default(),
            "Responding with error"
        );
        (self.status, Json(self)).into_response()
    }
}
