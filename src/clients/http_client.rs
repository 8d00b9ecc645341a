//! HTTP client for Scalr API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Scalr API with automatic retry handling.

use std::collections::HashMap;

use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{DataType, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::{is_retryable_status, is_retryable_transport, RetryPolicy};
use crate::config::ScalrConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// SDK name used in the `User-Agent` header.
pub const SDK_NAME: &str = "scalr-api-rust";

/// HTTP client for making requests to the Scalr API.
///
/// The client handles:
/// - URL construction from the configured address and base path
/// - Default headers including `User-Agent` and the bearer token
/// - Automatic retries for 429, 5xx (except 501) and connection failures
/// - JSON:API error classification
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use scalr_api::{ScalrConfig, HttpClient, HttpRequest, HttpMethod};
///
/// let config = ScalrConfig::from_env()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "environments")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://acme.scalr.io`).
    base_uri: String,
    /// Base path (e.g., "/api/iacp/v3").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Retry policy for transient failures.
    retry_policy: RetryPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use scalr_api::{ScalrConfig, ApiToken};
    /// use scalr_api::clients::HttpClient;
    ///
    /// let config = ScalrConfig::builder()
    ///     .token(ApiToken::new("token").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.base_uri(), "https://scalr.io");
    /// ```
    pub fn new(config: &ScalrConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}{SDK_NAME}/{SDK_VERSION}");

        let content_type = DataType::JsonApi.as_content_type().to_string();

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), content_type.clone());
        default_headers.insert("Content-Type".to_string(), content_type);
        default_headers.insert("Authorization".to_string(), config.token().bearer());
        for (name, value) in config.headers() {
            default_headers.insert(name.clone(), value.clone());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_uri: config.address().as_ref().to_string(),
            base_path: config.base_path().to_string(),
            default_headers,
            retry_policy: *config.retry_policy(),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy for this client.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Builds the absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            path.trim_start_matches('/')
        )
    }

    /// Sends an HTTP request to the Scalr API.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging
    /// - Response parsing
    /// - Retry logic for rate limits, server errors and connection failures
    /// - Deprecation warning logging
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }
        let header_map = Self::build_header_map(&headers)?;

        let max_retries = request
            .max_retries
            .unwrap_or_else(|| self.retry_policy.max_retries());
        let body = request.body.as_ref().map(ToString::to_string);

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(
                method = %request.http_method,
                url = %url,
                attempt = attempt + 1,
                "Sending request to Scalr API"
            );

            let mut req_builder = self
                .client
                .request(request.http_method.as_reqwest(), &url)
                .headers(header_map.clone());

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }
            if let Some(body) = &body {
                req_builder = req_builder.body(body.clone());
            }

            let res = match req_builder.send().await {
                Ok(res) => res,
                Err(error) if is_retryable_transport(&error) && attempt < max_retries => {
                    let delay = self.retry_policy.delay_for(attempt, None);
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "Transport error, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(error) => return Err(HttpError::Network(error)),
            };

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let response = HttpResponse::new(code, res_headers, Self::parse_body(code, &body_text));

            if let Some(reason) = response.deprecation() {
                tracing::warn!(
                    path = %request.path,
                    deprecation = %reason,
                    "Deprecated Scalr API endpoint"
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error = HttpResponseError::from_response(&response);

            if !is_retryable_status(code) {
                return Err(HttpError::Response(error));
            }

            if attempt >= max_retries {
                if max_retries == 0 {
                    return Err(HttpError::Response(error));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: max_retries + 1,
                    message: error.message,
                    error_reference: error.error_reference,
                }));
            }

            let delay = self.retry_policy.delay_for(attempt, Some(&response));
            tracing::warn!(
                url = %url,
                status = code,
                attempt = attempt + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retryable response from Scalr API"
            );
            attempt += 1;
            tokio::time::sleep(delay).await;
        }
    }

    /// Converts merged headers into a reqwest header map.
    fn build_header_map(
        headers: &HashMap<String, String>,
    ) -> Result<reqwest::header::HeaderMap, InvalidHttpRequestError> {
        let mut map = reqwest::header::HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let invalid = || InvalidHttpRequestError::InvalidHeader { name: name.clone() };
            let header_name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| invalid())?;
            let header_value =
                reqwest::header::HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// Parses a response body, keeping unparseable error bodies as text.
    fn parse_body(code: u16, body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text).unwrap_or_else(|_| {
            if code >= 400 {
                serde_json::json!({ "raw_body": body_text })
            } else {
                serde_json::json!({})
            }
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
