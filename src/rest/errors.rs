//! Resource-specific error types for REST API operations.
//!
//! This module contains error types for REST resource operations, extending
//! the base [`RestError`](crate::clients::RestError) with resource-specific
//! semantics like `NotFound` and `ValidationFailed`.
//!
//! # Error Handling
//!
//! The SDK maps HTTP status codes to semantic error variants:
//!
//! - **404**: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **401/403**: [`ResourceError::Unauthorized`] - Token rejected
//! - **422**: [`ResourceError::ValidationFailed`] - Validation errors from the API
//! - **Other 4xx/5xx**: [`ResourceError::Http`] - Wrapped HTTP error
//!
//! Invalid ids and missing required fields are caught before any request is
//! sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::{ApiResource, ResourceError};
//! use scalr_api::rest::resources::Workspace;
//!
//! match Workspace::read(&client, "ws-123", &[]).await {
//!     Ok(workspace) => println!("Found: {:?}", workspace.attributes.name),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{} with id {} not found", resource, id);
//!     }
//!     Err(ResourceError::ValidationFailed { errors, .. }) => {
//!         for error in errors {
//!             println!("{:?}: {:?}", error.pointer(), error.detail);
//!         }
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use crate::clients::{ErrorKind, HttpError, RestError};
use crate::jsonapi::ErrorObject;
use thiserror::Error;

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Workspace",
///     id: "ws-123".to_string(),
/// };
/// assert_eq!(error.to_string(), "Workspace with id ws-123 not found");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Workspace").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The token was rejected or lacks permissions (HTTP 401 or 403).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// The message returned by the server.
        message: String,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The server rejected the payload (HTTP 422).
    #[error("Validation failed: {}", summarize(.errors))]
    ValidationFailed {
        /// The JSON:API error objects.
        errors: Vec<ErrorObject>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// An id does not have the shape of a Scalr id.
    #[error("Invalid {resource} id '{id}'")]
    InvalidId {
        /// The type name of the resource.
        resource: &'static str,
        /// The rejected id.
        id: String,
    },

    /// A field required on create was not set.
    #[error("{resource} requires '{field}' to be set")]
    RequiredField {
        /// The type name of the resource.
        resource: &'static str,
        /// The missing field.
        field: &'static str,
    },

    /// No valid path matches the provided IDs and operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "read", "list", "delete").
        operation: &'static str,
    },

    /// A response document could not be decoded.
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// A request payload could not be encoded.
    #[error("Failed to encode {resource} request: {source}")]
    Encode {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a REST client error to a semantic resource error.
    ///
    /// `id` is the id the request was made for, if any.
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        match error {
            RestError::Http(HttpError::Response(response)) => match response.kind {
                ErrorKind::NotFound => Self::NotFound {
                    resource,
                    id: id.unwrap_or("unknown").to_string(),
                },
                ErrorKind::Unauthorized | ErrorKind::Forbidden => Self::Unauthorized {
                    message: response.message,
                    request_id: response.error_reference,
                },
                ErrorKind::UnprocessableEntity => Self::ValidationFailed {
                    errors: response.errors,
                    request_id: response.error_reference,
                },
                _ => Self::Http(HttpError::Response(response)),
            },
            RestError::Http(other) => Self::Http(other),
            other @ RestError::InvalidPath { .. } => Self::Rest(other),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { request_id, .. } | Self::Unauthorized { request_id, .. } => {
                request_id.as_deref()
            }
            Self::Http(HttpError::Response(e)) | Self::Rest(RestError::Http(HttpError::Response(e))) => {
                e.error_reference.as_deref()
            }
            Self::Http(HttpError::MaxRetries(e))
            | Self::Rest(RestError::Http(HttpError::MaxRetries(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

fn summarize(errors: &[ErrorObject]) -> String {
    if errors.is_empty() {
        return "no details returned".to_string();
    }
    errors
        .iter()
        .map(|e| match (e.detail.as_deref(), e.title.as_deref()) {
            (Some(detail), _) => detail.to_string(),
            (None, Some(title)) => title.to_string(),
            (None, None) => "unknown error".to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
