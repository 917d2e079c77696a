//! Transport-agnostic failure taxonomy.
//!
//! Every failure raised during request handling is one of these variants.
//! Inbound adapters translate them into HTTP envelopes; the domain itself
//! never sees status codes or wire formats.

use std::collections::BTreeMap;
use std::fmt;

/// Ordered mapping of field name to validation message.
///
/// Ordered so serialised envelopes are deterministic; inserting the same
/// field twice keeps the last message.
pub type FieldErrors = BTreeMap<String, String>;

/// Closed set of failure kinds recognised by the translation boundary.
///
/// `Internal` is the explicit default arm: anything not matching a more
/// specific kind is folded into it before it reaches the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested entity does not exist.
    NotFound { resource: &'static str, id: String },
    /// No handler matched the request path.
    RouteNotFound { method: String, path: String },
    /// Input validation failed; one message per offending field.
    Validation(FieldErrors),
    /// Authenticated but not permitted to perform this action.
    Forbidden(String),
    /// An outbound HTTP call returned a client or server error.
    ///
    /// `detail` is the upstream error's textual representation. It may embed
    /// a JSON document preceded by explanatory text, with the literal token
    /// `<EOL>` standing in for newlines.
    Upstream { status: u16, detail: String },
    /// Any other failure.
    Internal(String),
}

impl DomainError {
    /// Convenience constructor for [`DomainError::NotFound`].
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Convenience constructor for [`DomainError::RouteNotFound`].
    pub fn route_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Convenience constructor for [`DomainError::Validation`].
    pub fn validation(fields: FieldErrors) -> Self {
        Self::Validation(fields)
    }

    /// Convenience constructor for [`DomainError::Forbidden`].
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Convenience constructor for [`DomainError::Upstream`].
    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            detail: detail.into(),
        }
    }

    /// Convenience constructor for [`DomainError::Internal`].
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "Could not find {resource} with id {id}.")
            }
            Self::RouteNotFound { method, path } => write!(f, "No endpoint {method} {path}."),
            Self::Validation(fields) => {
                write!(f, "{} field(s) failed validation", fields.len())
            }
            Self::Forbidden(reason) => f.write_str(reason),
            Self::Upstream { status, .. } => {
                write!(f, "upstream service returned status {status}")
            }
            Self::Internal(detail) => f.write_str(detail),
        }
    }
}

impl std::error::Error for DomainError {}
