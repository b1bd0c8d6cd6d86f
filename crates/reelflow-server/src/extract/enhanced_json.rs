//! JSON extractor whose rejections render as the API error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Request body ceiling, also enforced by the security layer.
pub const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Longest rejection detail copied into logs.
const MAX_DETAIL_CHARS: usize = 200;

/// Drop-in replacement for [`axum::Json`].
///
/// A body that is not JSON, has the wrong content type or exceeds
/// [`MAX_JSON_PAYLOAD_SIZE`] becomes a `400` or `413` [`Error`] instead of
/// axum's plain-text rejection.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        let detail = condense(&rejection.body_text());

        match rejection {
            JsonRejection::JsonSyntaxError(_) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_suggestion("Ensure the request body is well-formed JSON")
                .with_context(detail),
            JsonRejection::JsonDataError(_) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_suggestion("Send a JSON object with the automation request fields")
                .with_context(detail),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_suggestion("Set the header Content-Type: application/json"),
            JsonRejection::BytesRejection(_) if detail.contains("length limit") => {
                ErrorKind::PayloadTooLarge
                    .with_message("Request body too large")
                    .with_context(format!("limit is {MAX_JSON_PAYLOAD_SIZE} bytes"))
            }
            JsonRejection::BytesRejection(_) => ErrorKind::BadRequest
                .with_message("Failed to read request body")
                .with_context(detail),
            _ => ErrorKind::InternalServerError.with_context(detail),
        }
    }
}

/// Joins the first three lines of a rejection and caps its length.
fn condense(text: &str) -> String {
    text.lines()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_DETAIL_CHARS)
        .collect()
}
