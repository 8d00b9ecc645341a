//! HTTP client types for Scalr API communication.
//!
//! This module provides the HTTP transport layer for making authenticated
//! requests to the Scalr API. It handles request/response processing,
//! retry logic, and JSON:API error classification.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`RetryPolicy`]: Exponential backoff settings
//! - [`rest::RestClient`]: Higher-level REST API client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Waits for `Retry-After` (or `X-RateLimit-Reset`)
//!   when present, otherwise backs off
//! - **5xx except 501**: Backs off exponentially with jitter
//! - **Connection and timeout errors**: Backs off exponentially with jitter
//! - **Other errors (4xx, 501)**: Returned immediately
//!
//! At most [`RetryPolicy::max_retries`] retries are made; a request can
//! override the budget with [`HttpRequestBuilder::max_retries`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;
mod retry;

pub use errors::{
    ErrorKind, HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_NAME, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit};
pub use retry::{is_retryable_status, is_retryable_transport, RetryPolicy};

pub use rest::{RestClient, RestError};
