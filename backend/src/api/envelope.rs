//! Uniform response envelope.
//!
//! Every reply from the API, success or failure, is serialised as
//! `{ success, statusCode, message, data }`. The `statusCode` field is an
//! application-level code distinct from the HTTP status; it usually mirrors
//! the HTTP value, and the upstream passthrough path may carry any code the
//! remote service produced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application-level status codes carried in [`Envelope::status_code`].
pub mod status {
    pub const SUCCESS: u16 = 200;
    pub const INVALID_ARGUMENT: u16 = 400;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Response envelope shared by every API reply.
///
/// Immutable once constructed; created fresh per response and discarded
/// after serialisation. `data` is always present on the wire, as `null`
/// when there is nothing to attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    success: bool,
    status_code: u16,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl Envelope {
    /// Build a success envelope carrying `data`.
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            status_code: status::SUCCESS,
            message: message.into(),
            data,
        }
    }

    /// Build a failure envelope under an explicit application status code.
    pub fn failure(status_code: u16, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            data,
        }
    }

    /// Whether the request succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Application-level status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human-readable outcome message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Attached payload, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}
