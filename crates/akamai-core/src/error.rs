//! Error types for Akamai API operations.
//!
//! This module provides the error hierarchy shared by every API client crate:
//! client-side validation failures, request construction and transport failures
//! (both carrying the name of the failing operation), and structured API errors
//! decoded from non-success HTTP responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for Akamai API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A request was rejected before any network I/O because required
    /// identifying fields were missing.
    #[error("struct validation: {0}")]
    Validation(String),

    /// The outbound request could not be assembled.
    #[error("failed to create {operation} request: {message}")]
    RequestBuild {
        /// Operation that was being prepared
        operation: String,
        /// Underlying cause
        message: String,
    },

    /// The request was sent but no usable response came back.
    #[error("{operation} request failed: {message}")]
    Transport {
        /// Operation that was being executed
        operation: String,
        /// Underlying cause
        message: String,
    },

    /// The API answered with a non-success status code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint or request path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Remote host could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Specialized result type for Akamai API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap `source` as a request construction failure for `operation`.
    #[must_use]
    pub fn request_build(operation: &str, source: impl fmt::Display) -> Self {
        Self::RequestBuild {
            operation: operation.to_string(),
            message: source.to_string(),
        }
    }

    /// Wrap `source` as a transport failure for `operation`.
    #[must_use]
    pub fn transport(operation: &str, source: impl fmt::Display) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            message: source.to_string(),
        }
    }

    /// Returns true if the request never left the client because it failed validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the structured API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status code reported by the API, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.as_api().map(|err| err.status_code)
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "STRUCT_VALIDATION",
            Self::RequestBuild { .. } => "REQUEST_BUILD",
            Self::Transport { .. } => "TRANSPORT",
            Self::Api(_) => "API_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
        }
    }
}

/// Structured error returned by the API for non-success responses.
///
/// The body follows the problem-details layout (`type`, `title`, `detail`,
/// `status`). `status_code` always reflects the HTTP status of the response,
/// whatever the body claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error category
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Short summary
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Human-readable explanation
    #[serde(default)]
    pub detail: String,
    /// Request instance identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    /// Offending behavior, for rule-tree errors
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub behavior_name: String,
    /// Location of the error within the submitted document
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_location: String,
    /// HTTP status code
    #[serde(rename = "status", default)]
    pub status_code: u16,
    /// Per-field errors, kept as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<serde_json::Value>,
}

const UNREADABLE_BODY_TITLE: &str =
    "Failed to unmarshal error body. Application Security API failed. Check details for more information.";

impl ApiError {
    /// Build an error from the status and raw body of a failed response.
    ///
    /// Bodies that are not valid problem-details JSON are kept verbatim in
    /// `detail`.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let mut error = serde_json::from_slice::<Self>(body).unwrap_or_else(|err| {
            tracing::debug!(%err, "could not unmarshal API error");
            Self {
                title: UNREADABLE_BODY_TITLE.to_string(),
                detail: String::from_utf8_lossy(body).into_owned(),
                ..Self::default()
            }
        });
        error.status_code = status;
        error
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(body) => write!(f, "API error: \n{body}"),
            Err(err) => write!(f, "error marshaling API error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Render validator output as `field: message` pairs in field order.
#[must_use]
pub fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map_or_else(|| err.code.to_string(), ToString::to_string)
                })
                .collect::<Vec<_>>()
                .join(", ");
            (field.to_string(), messages)
        })
        .collect();
    fields.sort();

    fields
        .into_iter()
        .map(|(field, messages)| format!("{field}: {messages}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(describe_validation_errors(&err))
    }
}
