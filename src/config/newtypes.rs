//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Scalr API token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use scalr_api::ApiToken;
///
/// let token = ApiToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// Surrounding whitespace is removed; tokens copied from files
    /// frequently carry a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated Scalr address.
///
/// The address is the scheme and host (and optional port) of a Scalr
/// installation. Trailing slashes are removed so that paths can be appended
/// without producing `//`.
///
/// # Example
///
/// ```rust
/// use scalr_api::Address;
///
/// let address = Address::new("https://example.scalr.io/").unwrap();
/// assert_eq!(address.as_ref(), "https://example.scalr.io");
/// assert_eq!(address.scheme(), "https");
/// assert_eq!(address.host_name(), "example.scalr.io");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Address {
    /// Creates a new validated address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if the scheme is not `http` or
    /// `https`, or if the host is missing.
    pub fn new(address: impl Into<String>) -> Result<Self, ConfigError> {
        let address = address.into();
        let url = address.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidAddress {
            address: address.clone(),
        };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start || remainder.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Builds an `https` address from a bare host name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if the host name is empty or
    /// malformed.
    pub fn from_hostname(hostname: &str) -> Result<Self, ConfigError> {
        let hostname = hostname.trim();
        if hostname.contains("://") {
            return Self::new(hostname);
        }
        Self::new(format!("https://{hostname}"))
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the address.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for Address {
    fn default() -> Self {
        let url = super::DEFAULT_ADDRESS.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: url.len(),
            url,
        }
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
