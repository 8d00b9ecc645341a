//! Types and helpers shared by several resources.

use serde::{Deserialize, Serialize};

use crate::jsonapi::Relationship;
use crate::value::TriState;

/// A VCS repository binding, used by workspaces and hooks.
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::resources::v3::common::VcsRepo;
///
/// let repo = VcsRepo {
///     identifier: Some("org/infrastructure".to_string()),
///     branch: Some("main".to_string()),
///     ..Default::default()
/// };
/// let json = serde_json::to_value(&repo).unwrap();
/// assert_eq!(json["identifier"], "org/infrastructure");
/// assert!(json.get("trigger-prefixes").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRepo {
    /// The repository in `org/repo` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// The branch to track. The repository default branch when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// The path within the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Path prefixes whose changes trigger runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_prefixes: Option<Vec<String>>,

    /// Whether pull requests trigger dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_runs_enabled: Option<bool>,

    /// Whether submodules are cloned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_submodules: Option<bool>,
}

/// Builds a to-one relationship from an id field of an options struct.
pub fn to_one(resource_type: &str, id: &TriState<String>) -> TriState<Relationship> {
    id.as_ref()
        .map(|id| Relationship::to_one(resource_type, id.as_str()))
}

/// Builds a to-many relationship from an id list field.
///
/// `Null` clears the relationship with an empty list.
pub fn to_many(resource_type: &str, ids: &TriState<Vec<String>>) -> TriState<Relationship> {
    match ids {
        TriState::Unset => TriState::Unset,
        TriState::Null => TriState::Value(Relationship::to_many(resource_type, Vec::<String>::new())),
        TriState::Value(ids) => TriState::Value(Relationship::to_many(resource_type, ids.iter().cloned())),
    }
}
