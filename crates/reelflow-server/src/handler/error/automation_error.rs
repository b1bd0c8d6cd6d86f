//! Automation error to HTTP error conversion implementation.
//!
//! Maps [`reelflow_core::Error`] to HTTP errors. Upstream and transport
//! failures are logged with the full cause chain; only the safe message
//! reaches the client.

use std::error::Error as StdError;

use reelflow_core::{ErrorKind as CoreErrorKind, ValidationError};

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for automation error conversions.
const TRACING_TARGET: &str = "reelflow_server::handler::automation";

/// Renders an error and its sources as `outer: inner: root`.
fn cause_chain(error: &dyn StdError) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// Names the accepted values of invalid fields, or asks for the missing ones.
fn suggestion(validation: &ValidationError) -> String {
    let choices: Vec<String> = validation
        .invalid
        .iter()
        .filter_map(|field| {
            let allowed = field.allowed_values()?;
            Some(format!("{field} must be one of: {}", allowed.join(", ")))
        })
        .collect();

    if choices.is_empty() {
        return "Provide a non-empty value for every listed field".to_owned();
    }

    let choices = choices.join("; ");
    if validation.missing.is_empty() {
        choices
    } else {
        format!("Provide a non-empty value for every missing field; {choices}")
    }
}

impl From<reelflow_core::Error> for HttpError<'static> {
    fn from(error: reelflow_core::Error) -> Self {
        match error.kind {
            CoreErrorKind::Validation => {
                let validation = error.validation.unwrap_or_default();
                let fields: Vec<&'static str> = validation.fields().map(Into::into).collect();

                ErrorKind::ValidationError
                    .with_message(error.message.unwrap_or_default())
                    .with_fields(fields)
                    .with_suggestion(suggestion(&validation))
            }
            CoreErrorKind::Upstream => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    status = ?error.status,
                    error = %cause_chain(&error),
                    "Automation service rejected the request"
                );

                let status = error
                    .status
                    .map(|status| format!("upstream status {status}"))
                    .unwrap_or_default();

                ErrorKind::BadGateway
                    .with_message(
                        error
                            .message
                            .unwrap_or(std::borrow::Cow::Borrowed("Automation service error")),
                    )
                    .with_resource("automation")
                    .with_context(status)
            }
            CoreErrorKind::Transport => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    context = ?error.context,
                    error = %cause_chain(&error),
                    "Automation service unreachable"
                );

                ErrorKind::BadGateway
                    .with_message("Unable to trigger automation")
                    .with_resource("automation")
            }
            CoreErrorKind::Serialization | CoreErrorKind::Configuration | CoreErrorKind::Unknown => {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = %error.kind,
                    error = %cause_chain(&error),
                    "Automation failed"
                );

                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

impl From<ValidationError> for HttpError<'static> {
    fn from(error: ValidationError) -> Self {
        reelflow_core::Error::from(error).into()
    }
}
