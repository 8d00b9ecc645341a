//! HTTP-specific error types for the Scalr API SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, classified by [`ErrorKind`]
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::clients::{ErrorKind, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) if e.kind == ErrorKind::NotFound => {
//!         println!("Nothing there");
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Gave up after {} tries", e.tries);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_response::HttpResponse;
use crate::jsonapi::ErrorObject;

/// Classification of a non-successful HTTP status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: the request was malformed.
    BadRequest,
    /// 401: the token is missing, expired or invalid.
    Unauthorized,
    /// 403: the token lacks the required permissions.
    Forbidden,
    /// 404: the resource does not exist or is not visible.
    NotFound,
    /// 409: the request conflicts with the current state.
    Conflict,
    /// 422: the payload failed server-side validation.
    UnprocessableEntity,
    /// 429: too many requests.
    RateLimited,
    /// Any 5xx status.
    Server,
    /// Any other non-2xx status.
    Other,
}

impl ErrorKind {
    /// Classifies an HTTP status code.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scalr_api::clients::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
    /// ```
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::UnprocessableEntity,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }

    /// Returns `true` for 4xx classifications.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Server | Self::Other)
    }
}

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is built from the JSON:API `errors` array: each error
/// contributes its `title`, followed by a blank line and its `detail` when
/// one is present. Responses without error objects fall back to the
/// canonical reason phrase of the status.
///
/// # Example
///
/// ```rust
/// use scalr_api::clients::{ErrorKind, HttpResponseError};
///
/// let error = HttpResponseError {
///     code: 404,
///     kind: ErrorKind::NotFound,
///     message: "Not Found".to_string(),
///     errors: Vec::new(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "Not Found");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The classification of the status code.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// The JSON:API error objects returned by the server.
    pub errors: Vec<ErrorObject>,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Builds a classified error from a non-successful response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let errors = response.errors();
        let message = format_error_message(response.code, &errors, &response.body);

        Self {
            code: response.code,
            kind: ErrorKind::from_status(response.code),
            message,
            errors,
            error_reference: response.request_id().map(String::from),
        }
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// This error is raised when a request keeps failing with a retryable status
/// after all configured retries have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent if it fails validation
/// checks, such as:
/// - Missing body for POST/PUT/PATCH requests
/// - Body provided without `body_type`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A header name or value cannot be sent.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the classification of the failing status, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self.status() {
            Some(code) => Some(ErrorKind::from_status(code)),
            None => None,
        }
    }
}

/// Formats the human-readable message for an error response.
fn format_error_message(code: u16, errors: &[ErrorObject], body: &serde_json::Value) -> String {
    let parts: Vec<String> = errors
        .iter()
        .filter_map(|e| match (e.title.as_deref(), e.detail.as_deref()) {
            (Some(title), Some(detail)) if !detail.is_empty() => {
                Some(format!("{title}\n\n{detail}"))
            }
            (Some(title), _) => Some(title.to_string()),
            (None, Some(detail)) => Some(detail.to_string()),
            (None, None) => None,
        })
        .collect();

    if !parts.is_empty() {
        return parts.join("\n");
    }

    if let Some(raw) = body.get("raw_body").and_then(serde_json::Value::as_str) {
        if !raw.is_empty() {
            return raw.to_string();
        }
    }

    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map_or_else(|| format!("HTTP {code}"), ToString::to_string)
}
