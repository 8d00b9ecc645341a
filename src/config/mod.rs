//! Configuration types for the Scalr API SDK.
//!
//! This module provides the configuration used to build an
//! [`HttpClient`](crate::clients::HttpClient) for a Scalr installation.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ScalrConfig`]: The main configuration struct holding all SDK settings
//! - [`ScalrConfigBuilder`]: A builder for constructing [`ScalrConfig`] instances
//! - [`ApiToken`]: A validated API token with masked debug output
//! - [`Address`]: A validated Scalr address (scheme and host)
//!
//! # Example
//!
//! ```rust
//! use scalr_api::{ScalrConfig, ApiToken, Address};
//!
//! let config = ScalrConfig::builder()
//!     .address(Address::new("https://acme.scalr.io").unwrap())
//!     .token(ApiToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_path(), "/api/iacp/v3");
//! ```

mod newtypes;

pub use newtypes::{Address, ApiToken};

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "https://scalr.io";

/// Path prefix of the IaC platform API.
pub const DEFAULT_BASE_PATH: &str = "/api/iacp/v3";

/// Environment variable holding the Scalr address.
pub const ENV_ADDRESS: &str = "SCALR_ADDRESS";

/// Environment variable holding a bare Scalr host name.
pub const ENV_HOSTNAME: &str = "SCALR_HOSTNAME";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "SCALR_TOKEN";

/// Configuration for the Scalr API SDK.
///
/// # Thread Safety
///
/// `ScalrConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use scalr_api::{ScalrConfig, ApiToken};
/// use std::time::Duration;
///
/// let config = ScalrConfig::builder()
///     .token(ApiToken::new("my-token").unwrap())
///     .timeout(Duration::from_secs(10))
///     .user_agent_prefix("terraform-provider/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.address().as_ref(), "https://scalr.io");
/// assert_eq!(config.user_agent_prefix(), Some("terraform-provider/1.0"));
/// ```
#[derive(Clone, Debug)]
pub struct ScalrConfig {
    address: Address,
    token: ApiToken,
    base_path: String,
    user_agent_prefix: Option<String>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ScalrConfig {
    /// Creates a new builder for constructing a `ScalrConfig`.
    #[must_use]
    pub fn builder() -> ScalrConfigBuilder {
        ScalrConfigBuilder::new()
    }

    /// Builds a configuration from `SCALR_ADDRESS`, `SCALR_HOSTNAME` and
    /// `SCALR_TOKEN`.
    ///
    /// `SCALR_ADDRESS` wins over `SCALR_HOSTNAME`; when neither is set the
    /// default address is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `SCALR_TOKEN` is not
    /// set, or [`ConfigError::InvalidEnvironment`] if a variable holds an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().with_env_lookup(|name| std::env::var(name).ok())?.build()
    }

    /// Returns the Scalr address.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the API token.
    #[must_use]
    pub const fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Returns the API base path (e.g., "/api/iacp/v3").
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

// Verify ScalrConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ScalrConfig>();
};

/// Builder for constructing [`ScalrConfig`] instances.
///
/// The only required field is `token`.
///
/// # Defaults
///
/// - `address`: `https://scalr.io`
/// - `base_path`: `/api/iacp/v3`
/// - `retry_policy`: [`RetryPolicy::default`]
/// - `timeout`: `None` (no client-side timeout)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ScalrConfigBuilder {
    address: Option<Address>,
    token: Option<ApiToken>,
    base_path: Option<String>,
    user_agent_prefix: Option<String>,
    retry_policy: Option<RetryPolicy>,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ScalrConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Scalr address.
    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Overrides the API base path.
    ///
    /// A missing leading slash is added and trailing slashes are removed.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets a timeout applied to every HTTP attempt.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Fills unset fields from a variable lookup.
    ///
    /// [`ScalrConfig::from_env`] passes `std::env::var`; tests pass a map.
    /// Values already set on the builder are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvironment`] if a variable is present
    /// but holds an unusable value.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.address.is_none() {
            if let Some(address) = non_empty(ENV_ADDRESS) {
                self.address = Some(Address::new(address).map_err(|e| {
                    ConfigError::InvalidEnvironment {
                        name: ENV_ADDRESS,
                        reason: e.to_string(),
                    }
                })?);
            } else if let Some(hostname) = non_empty(ENV_HOSTNAME) {
                self.address = Some(Address::from_hostname(&hostname).map_err(|e| {
                    ConfigError::InvalidEnvironment {
                        name: ENV_HOSTNAME,
                        reason: e.to_string(),
                    }
                })?);
            }
        }

        if self.token.is_none() {
            if let Some(token) = non_empty(ENV_TOKEN) {
                self.token = Some(ApiToken::new(token).map_err(|e| {
                    ConfigError::InvalidEnvironment {
                        name: ENV_TOKEN,
                        reason: e.to_string(),
                    }
                })?);
            }
        }

        Ok(self)
    }

    /// Builds the [`ScalrConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `token` is not set.
    pub fn build(self) -> Result<ScalrConfig, ConfigError> {
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        let base_path = self.base_path.map_or_else(
            || DEFAULT_BASE_PATH.to_string(),
            |path| {
                let trimmed = path.trim().trim_end_matches('/');
                if trimmed.is_empty() || trimmed.starts_with('/') {
                    trimmed.to_string()
                } else {
                    format!("/{trimmed}")
                }
            },
        );

        Ok(ScalrConfig {
            address: self.address.unwrap_or_default(),
            token,
            base_path,
            user_agent_prefix: self.user_agent_prefix,
            retry_policy: self.retry_policy.unwrap_or_default(),
            timeout: self.timeout,
            headers: self.headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_token() {
        let result = ScalrConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ScalrConfig::builder()
            .token(ApiToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.address().as_ref(), DEFAULT_ADDRESS);
        assert_eq!(config.base_path(), DEFAULT_BASE_PATH);
        assert_eq!(config.retry_policy(), &RetryPolicy::default());
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_base_path_is_normalized() {
        let config = ScalrConfig::builder()
            .token(ApiToken::new("token").unwrap())
            .base_path("api/iacp/v3/")
            .build()
            .unwrap();

        assert_eq!(config.base_path(), "/api/iacp/v3");
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = ScalrConfig::builder()
            .token(ApiToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ScalrConfig"));
        assert!(!debug_str.contains("very-secret"));
    }

    #[test]
    fn test_with_env_lookup_reads_address_and_token() {
        let config = ScalrConfigBuilder::new()
            .with_env_lookup(lookup(&[
                (ENV_ADDRESS, "https://acme.scalr.io"),
                (ENV_TOKEN, "env-token"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.address().as_ref(), "https://acme.scalr.io");
        assert_eq!(config.token().as_ref(), "env-token");
    }

    #[test]
    fn test_with_env_lookup_accepts_hostname_alias() {
        let config = ScalrConfigBuilder::new()
            .with_env_lookup(lookup(&[(ENV_HOSTNAME, "acme.scalr.io"), (ENV_TOKEN, "t")]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.address().as_ref(), "https://acme.scalr.io");
    }

    #[test]
    fn test_with_env_lookup_prefers_address_over_hostname() {
        let config = ScalrConfigBuilder::new()
            .with_env_lookup(lookup(&[
                (ENV_ADDRESS, "http://localhost:8080"),
                (ENV_HOSTNAME, "acme.scalr.io"),
                (ENV_TOKEN, "t"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.address().as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_with_env_lookup_keeps_explicit_values() {
        let config = ScalrConfigBuilder::new()
            .token(ApiToken::new("explicit").unwrap())
            .with_env_lookup(lookup(&[(ENV_TOKEN, "from-env")]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.token().as_ref(), "explicit");
    }

    #[test]
    fn test_with_env_lookup_rejects_invalid_address() {
        let result = ScalrConfigBuilder::new().with_env_lookup(lookup(&[(ENV_ADDRESS, "acme")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvironment {
                name: ENV_ADDRESS,
                ..
            })
        ));
    }

    #[test]
    fn test_with_env_lookup_without_token_fails_on_build() {
        let result = ScalrConfigBuilder::new()
            .with_env_lookup(lookup(&[]))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScalrConfig>();
    }
}
