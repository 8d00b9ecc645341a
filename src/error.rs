//! Error types for the Scalr API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Scalr API token.")]
    EmptyApiToken,

    /// Address is invalid.
    #[error("Invalid address '{address}'. Please provide a URL with scheme (e.g., 'https://example.scalr.io').")]
    InvalidAddress {
        /// The invalid address that was provided.
        address: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The retry policy is inconsistent.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// Why the policy was rejected.
        reason: String,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvironment {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
