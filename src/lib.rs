//! # Scalr API Rust SDK
//!
//! A Rust SDK for the Scalr infrastructure-automation API, providing
//! type-safe configuration, an HTTP client with retry handling, JSON:API
//! document types and typed bindings for Scalr resources.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ScalrConfig`] and [`ScalrConfigBuilder`]
//! - Validated newtypes for the API token and address
//! - Async HTTP client with bearer-token injection, retry with exponential
//!   backoff and jitter, and typed error classification
//! - JSON:API documents, relationships, errors and pagination via [`jsonapi`]
//! - A [`TriState`] value type for partial updates
//! - CRUD bindings for Scalr resources via [`rest::resources`]
//! - Lazy iteration over paginated listings via [`rest::PageIterator`]
//! - An OpenAPI code generator via [`generator`] and the `scalr-codegen` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use scalr_api::{ScalrConfig, ApiToken, Address};
//!
//! // Create configuration using the builder pattern
//! let config = ScalrConfig::builder()
//!     .address(Address::new("https://acme.scalr.io").unwrap())
//!     .token(ApiToken::new("my-token").unwrap())
//!     .user_agent_prefix("my-tool/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.address().as_ref(), "https://acme.scalr.io");
//! ```
//!
//! Or read `SCALR_ADDRESS` (or `SCALR_HOSTNAME`) and `SCALR_TOKEN`:
//!
//! ```rust,ignore
//! let config = ScalrConfig::from_env()?;
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use scalr_api::{RestClient, ScalrConfig, TriState};
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::{Variable, VariableCategory, VariableOptions};
//!
//! let client = RestClient::new(&ScalrConfig::from_env()?)?;
//!
//! let options = VariableOptions {
//!     key: "region".into(),
//!     value: "eu-west-1".into(),
//!     category: VariableCategory::Terraform.into(),
//!     workspace: "ws-123".into(),
//!     ..Default::default()
//! };
//! let variable = Variable::create(&client, &options).await?;
//!
//! // Clear the description, leave everything else untouched
//! let options = VariableOptions {
//!     description: TriState::Null,
//!     ..Default::default()
//! };
//! Variable::update(&client, &variable.id, &options).await?;
//! ```
//!
//! ## Making Raw Requests
//!
//! ```rust,ignore
//! use scalr_api::{HttpClient, HttpMethod, HttpRequest, ScalrConfig};
//!
//! let client = HttpClient::new(&ScalrConfig::from_env()?)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "workspaces")
//!     .query_param("filter[environment]", "env-123")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! if let Some(limit) = &response.rate_limit {
//!     println!("{} requests left this window", limit.remaining);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Explicit partial updates**: Only fields set on an options struct are sent

pub mod clients;
pub mod config;
pub mod error;
pub mod generator;
pub mod jsonapi;
pub mod rest;
pub mod value;

// Re-export public types at crate root for convenience
pub use config::{Address, ApiToken, ScalrConfig, ScalrConfigBuilder};
pub use error::ConfigError;
pub use value::TriState;

// Re-export HTTP client types
pub use clients::{
    DataType, ErrorKind, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    RateLimit, RestClient, RestError, RetryPolicy,
};

// Re-export resource infrastructure
pub use rest::{ApiResource, PageIterator, ResourceError, ResourceResponse};
