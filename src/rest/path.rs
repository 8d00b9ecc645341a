//! Path building infrastructure for REST resources.
//!
//! Resources can be reachable through more than one path. Provider
//! configuration parameters, for example, live under their provider
//! configuration:
//! - `provider-configurations/{provider_configuration}/parameters` (list, create)
//! - `provider-configuration-parameters/{id}` (read, update, delete)
//!
//! The path resolution system selects the most specific path whose
//! placeholders are all available.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use scalr_api::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::List,
//!         &["workspace"],
//!         "workspaces/{workspace}/vars",
//!     ),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "vars"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::List, &["workspace"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("workspace", "ws-1");
//! assert_eq!(build_path(path.template, &ids), "workspaces/ws-1/vars");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Read a single resource by ID (GET /resources/{id}).
    Read,
    /// List resources (GET /resources).
    List,
    /// Create a new resource (POST /resources).
    Create,
    /// Update an existing resource (PATCH /resources/{id}).
    Update,
    /// Delete a resource (DELETE /resources/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Read | Self::List => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for a REST resource operation.
///
/// Templates use `{name}` placeholders for id interpolation:
/// - `workspaces/{id}`
/// - `provider-configurations/{provider_configuration}/parameters`
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::{ResourcePath, ResourceOperation};
/// use scalr_api::HttpMethod;
///
/// const WORKSPACE_READ: ResourcePath = ResourcePath::new(
///     HttpMethod::Get,
///     ResourceOperation::Read,
///     &["id"],
///     "workspaces/{id}",
/// );
/// assert_eq!(WORKSPACE_READ.id_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required placeholder names in order (e.g., `["provider_configuration"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{name}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose placeholders are all available,
/// the one with the most placeholders wins.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a URL path from a template by interpolating IDs.
///
/// Each value is percent-encoded so that it always stays a single path
/// segment.
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "ws 1/2");
///
/// assert_eq!(build_path("workspaces/{id}", &ids), "workspaces/ws%201%2F2");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
