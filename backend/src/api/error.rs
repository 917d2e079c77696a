//! HTTP error translation boundary.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`] into an `(HTTP status, Envelope)` pair here. Every
//! failure raised during request handling is fully recovered at this
//! boundary; nothing propagates further up.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use super::envelope::{Envelope, status};
use crate::domain::{DomainError, FieldErrors};

const ROUTE_NOT_FOUND_MESSAGE: &str = "This API endpoint is not found.";
const INVALID_ARGUMENT_MESSAGE: &str = "Provided arguments are invalid, see data for details.";
const FORBIDDEN_MESSAGE: &str = "No permission.";
const REST_CLIENT_MESSAGE: &str = "A rest client error occurs, see data for details.";
const INTERNAL_MESSAGE: &str = "A server internal error occurs.";

/// Literal token upstream services use in place of newlines inside error
/// text.
const EOL_TOKEN: &str = "<EOL>";

/// A translated failure, ready to serialise as an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    http_status: StatusCode,
    envelope: Envelope,
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn new(http_status: StatusCode, envelope: Envelope) -> Self {
        Self {
            http_status,
            envelope,
        }
    }

    /// The generic fallback row: HTTP 500 carrying `detail` as data.
    fn internal_row(detail: String) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Envelope::failure(
                status::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE,
                Some(Value::String(detail)),
            ),
        )
    }

    /// HTTP status the response will carry.
    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    /// The response body.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

/// The dispatch table: first matching kind wins, `Internal` is the default
/// arm.
impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let own_message = error.to_string();
        match error {
            DomainError::NotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                Envelope::failure(status::NOT_FOUND, own_message, None),
            ),
            DomainError::RouteNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                Envelope::failure(
                    status::NOT_FOUND,
                    ROUTE_NOT_FOUND_MESSAGE,
                    Some(Value::String(own_message)),
                ),
            ),
            DomainError::Validation(fields) => Self::new(
                StatusCode::BAD_REQUEST,
                Envelope::failure(
                    status::INVALID_ARGUMENT,
                    INVALID_ARGUMENT_MESSAGE,
                    Some(field_errors_to_value(fields)),
                ),
            ),
            DomainError::Forbidden(_) => Self::new(
                StatusCode::FORBIDDEN,
                Envelope::failure(
                    status::FORBIDDEN,
                    FORBIDDEN_MESSAGE,
                    Some(Value::String(own_message)),
                ),
            ),
            DomainError::Upstream {
                status: upstream_status,
                detail,
            } => translate_upstream(upstream_status, &detail),
            DomainError::Internal(_) => {
                error!(detail = %own_message, "request failed with an uncaught error");
                Self::internal_row(own_message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.envelope.message())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.http_status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.http_status).json(&self.envelope)
    }
}

fn field_errors_to_value(fields: FieldErrors) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(field, message)| (field, Value::String(message)))
            .collect(),
    )
}

/// Failures of the upstream-message extraction protocol.
///
/// Any of these degrades the response to the generic 500 row instead of
/// crashing; the unguarded substring extraction in the original service is
/// deliberately hardened here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamExtractError {
    #[error("upstream error text contains no JSON object")]
    NoJsonObject,
    #[error("embedded upstream document is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("embedded upstream document has no error.message text")]
    MissingMessage,
    #[error("upstream status {0} is not a valid HTTP status code")]
    InvalidStatus(u16),
}

/// Map an upstream HTTP failure onto the passthrough row, or degrade to the
/// generic 500 row when the status or the embedded document is unusable.
fn translate_upstream(upstream_status: u16, detail: &str) -> ApiError {
    let outcome = StatusCode::from_u16(upstream_status)
        .map_err(|_| UpstreamExtractError::InvalidStatus(upstream_status))
        .and_then(|http_status| Ok((http_status, extract_upstream_message(detail)?)));
    match outcome {
        Ok((http_status, message)) => ApiError::new(
            http_status,
            Envelope::failure(
                upstream_status,
                REST_CLIENT_MESSAGE,
                Some(Value::String(message)),
            ),
        ),
        Err(extract_error) => {
            error!(
                error = %extract_error,
                upstream_status,
                "upstream error translation failed"
            );
            ApiError::internal_row(extract_error.to_string())
        }
    }
}

/// Pull the human-readable message out of an upstream error's text.
///
/// The text embeds a JSON document preceded by explanatory prose, with
/// `<EOL>` standing in for newlines: restore the newlines, take the
/// substring from the first `{` through the last `}`, parse it, and read
/// the string at `error.message`.
fn extract_upstream_message(detail: &str) -> Result<String, UpstreamExtractError> {
    let text = detail.replace(EOL_TOKEN, "\n");
    let start = text.find('{').ok_or(UpstreamExtractError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(UpstreamExtractError::NoJsonObject)?;
    // `}` before `{` yields an inverted range, which `get` rejects.
    let document = text
        .get(start..=end)
        .ok_or(UpstreamExtractError::NoJsonObject)?;
    let root: Value = serde_json::from_str(document)
        .map_err(|parse_error| UpstreamExtractError::InvalidJson(parse_error.to_string()))?;
    root.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(UpstreamExtractError::MissingMessage)
}
