//! HTTP response types for the Scalr API SDK.
//!
//! This module provides the [`HttpResponse`] type and related types for
//! parsing and accessing API response data.

use std::collections::HashMap;
use std::time::Duration;

use crate::jsonapi::ErrorObject;

/// Rate limit information parsed from the `X-RateLimit-*` headers.
///
/// # Example
///
/// ```rust
/// use scalr_api::clients::RateLimit;
///
/// let limit = RateLimit::parse(Some("100"), Some("42"), Some("1.5")).unwrap();
/// assert_eq!(limit.limit, 100);
/// assert_eq!(limit.remaining, 42);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimit {
    /// The number of requests allowed in the current window.
    pub limit: u32,
    /// The number of requests left in the current window.
    pub remaining: u32,
    /// Seconds until the window resets, if reported.
    pub reset: Option<f64>,
}

impl RateLimit {
    /// Parses the rate limit header values.
    ///
    /// Returns `None` unless both `limit` and `remaining` are present and
    /// numeric. A malformed `reset` is dropped rather than failing the parse.
    #[must_use]
    pub fn parse(limit: Option<&str>, remaining: Option<&str>, reset: Option<&str>) -> Option<Self> {
        let limit = limit?.trim().parse().ok()?;
        let remaining = remaining?.trim().parse().ok()?;
        let reset = reset
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }
}

/// An HTTP response from the Scalr API.
///
/// Contains the response status code, headers, body, and parsed
/// rate-limit header values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Rate limit information (from `X-RateLimit-*` headers).
    pub rate_limit: Option<RateLimit>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    ///
    /// Header names are expected in lower case, as produced by the client.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        };

        let rate_limit = RateLimit::parse(
            first("x-ratelimit-limit"),
            first("x-ratelimit-remaining"),
            first("x-ratelimit-reset"),
        );

        let retry_request_after = first("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            rate_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Deprecation` header value, if the endpoint is deprecated.
    ///
    /// The `Sunset` header, when present, is appended after a semicolon.
    #[must_use]
    pub fn deprecation(&self) -> Option<String> {
        let deprecation = self.header("deprecation")?;
        Some(match self.header("sunset") {
            Some(sunset) => format!("{deprecation}; sunset {sunset}"),
            None => deprecation.to_string(),
        })
    }

    /// Returns how long the server asked us to wait before retrying.
    ///
    /// `Retry-After` takes precedence over `X-RateLimit-Reset`. A value too
    /// large for a [`Duration`] is ignored.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_request_after
            .or_else(|| self.rate_limit.and_then(|limit| limit.reset))
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }

    /// Parses the JSON:API `errors` array from the body.
    ///
    /// Malformed entries are skipped; a body without `errors` yields an
    /// empty vector.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorObject> {
        self.body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
