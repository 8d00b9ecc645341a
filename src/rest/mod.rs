//! REST resource infrastructure for the Scalr API.
//!
//! This module provides the foundational infrastructure for REST resources with:
//!
//! - **[`ApiResource`] trait**: A standardized interface for CRUD operations
//! - **[`ResourceOptions`] trait**: Create/update payloads built from [`TriState`](crate::TriState) fields
//! - **[`ResourceResponse<T>`]**: A Deref-based wrapper for ergonomic response handling
//! - **[`PageIterator`]**: Lazy iteration over every page of a listing
//! - **Path building**: Multiple path support for nested resources
//! - **[`ResourceError`]**: Semantic error types for resource operations
//!
//! # Example: Using a Resource
//!
//! ```rust,ignore
//! use scalr_api::{RestClient, ScalrConfig, TriState};
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::{Workspace, WorkspaceListOptions, WorkspaceOptions};
//!
//! let config = ScalrConfig::from_env()?;
//! let client = RestClient::new(&config)?;
//!
//! // Read a single workspace
//! let workspace = Workspace::read(&client, "ws-123", &[]).await?;
//! println!("Workspace: {:?}", workspace.attributes.name);  // Deref to Workspace
//!
//! // List one page of workspaces
//! let options = WorkspaceListOptions {
//!     filter_environment: Some("env-123".to_string()),
//!     ..Default::default()
//! };
//! let response = Workspace::list(&client, Some(options)).await?;
//! for workspace in response.iter() {  // Deref to Vec<Workspace>
//!     println!("- {}", workspace.id);
//! }
//!
//! // Walk every page lazily
//! let mut all = Workspace::iter(&client, None)?;
//! while let Some(workspace) = all.next().await {
//!     let workspace = workspace?;
//!     println!("{} ({} left)", workspace.id, all.remaining().unwrap_or(0));
//! }
//!
//! // Partial update: only set fields are sent, Null clears a value
//! let options = WorkspaceOptions {
//!     auto_apply: true.into(),
//!     working_directory: TriState::Null,
//!     ..Default::default()
//! };
//! Workspace::update(&client, "ws-123", &options).await?;
//!
//! // Delete
//! Workspace::delete(&client, "ws-123").await?;
//! ```
//!
//! # Key Types
//!
//! - [`ResourceError`]: Error types for resource operations
//! - [`ResourcePath`] and [`ResourceOperation`]: Path building infrastructure
//! - [`ResourceResponse`]: Response wrapper with Deref for transparent data access
//! - [`ApiResource`]: Trait defining CRUD operations for resources
//! - [`resources`]: Version-specific resource bindings (e.g., Workspace, Variable)

mod errors;
mod iterator;
mod path;
mod resource;
mod response;
mod validation;

pub mod resources;

pub use errors::ResourceError;
pub use iterator::{Page, PageFuture, PageIterator};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{ApiResource, ResourceOptions};
pub use response::ResourceResponse;
pub use validation::{require, require_non_blank, validate_id, validate_optional_id};
