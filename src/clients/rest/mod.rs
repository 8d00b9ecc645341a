//! REST API client for the Scalr API.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that sends JSON:API documents
//! relative to the configured base path.
//!
//! # Overview
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `patch()`, `delete()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! - Leading and trailing slashes are stripped: `/workspaces/` -> `workspaces`
//! - Repeated slashes are collapsed
//! - Empty paths are rejected with [`RestError::InvalidPath`]

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
