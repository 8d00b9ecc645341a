//! Hook resource implementation.
//!
//! Hooks are scripts stored in a VCS repository that run at fixed points of
//! the run lifecycle (pre-init, pre-plan, post-plan, pre-apply, post-apply).
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{Hook, HookOptions};
//! use scalr_api::rest::resources::v3::common::VcsRepo;
//!
//! let options = HookOptions {
//!     name: "notify".into(),
//!     interpreter: "bash".into(),
//!     scriptfile_path: "hooks/notify.sh".into(),
//!     vcs_repo: VcsRepo {
//!         identifier: Some("org/hooks".to_string()),
//!         ..Default::default()
//!     }
//!     .into(),
//!     vcs_provider: "vcs-123".into(),
//!     account: "acc-123".into(),
//!     ..Default::default()
//! };
//! let hook = Hook::create(&client, &options).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require, require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

use super::common::{to_one, VcsRepo};

/// Attributes of a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HookAttributes {
    /// The hook name.
    pub name: Option<String>,

    /// A free-form description.
    pub description: Option<String>,

    /// The interpreter the script runs with (e.g., `bash`, `python3`).
    pub interpreter: Option<String>,

    /// The script path within the repository.
    pub scriptfile_path: Option<String>,

    /// The repository holding the script.
    pub vcs_repo: Option<VcsRepo>,

    /// When the hook was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationships of a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HookRelationships {
    /// The owning account.
    pub account: Option<Relationship>,

    /// The VCS provider used to fetch the script.
    pub vcs_provider: Option<Relationship>,
}

/// A lifecycle hook.
pub type Hook = Resource<HookAttributes, HookRelationships>;

impl ApiResource for Hook {
    type Options = HookOptions;
    type ListOptions = HookListOptions;

    const NAME: &'static str = "Hook";
    const TYPE: &'static str = "hooks";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "hooks/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "hooks"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "hooks"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "hooks/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "hooks/{id}",
        ),
    ];
}

/// Options for creating or updating a hook.
///
/// On create every field except `description` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HookOptions {
    /// The hook name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// A free-form description.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub description: TriState<String>,

    /// The interpreter.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub interpreter: TriState<String>,

    /// The script path within the repository.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub scriptfile_path: TriState<String>,

    /// The repository holding the script.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub vcs_repo: TriState<VcsRepo>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// The VCS provider id.
    #[serde(skip)]
    pub vcs_provider: TriState<String>,
}

impl ResourceOptions for HookOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            ("vcs-provider", to_one("vcs-providers", &self.vcs_provider)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Hook::NAME, "name", &self.name)?;
        require_non_blank(Hook::NAME, "interpreter", &self.interpreter)?;
        require_non_blank(Hook::NAME, "scriptfile-path", &self.scriptfile_path)?;
        require(Hook::NAME, "vcs-repo", &self.vcs_repo)?;
        require_non_blank(Hook::NAME, "vcs-provider", &self.vcs_provider)
    }
}

/// Parameters for listing hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HookListOptions {
    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Sort key, prefixed with `-` for descending order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Relationships to side-load.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Page to fetch.
    #[serde(flatten)]
    pub page: Option<PageOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_options() -> HookOptions {
        HookOptions {
            name: "notify".into(),
            interpreter: "bash".into(),
            scriptfile_path: "hooks/notify.sh".into(),
            vcs_repo: VcsRepo {
                identifier: Some("org/hooks".to_string()),
                branch: Some("main".to_string()),
                ..Default::default()
            }
            .into(),
            vcs_provider: "vcs-1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_hook_options_serialization() {
        assert_eq!(
            serde_json::to_value(complete_options()).unwrap(),
            json!({
                "name": "notify",
                "interpreter": "bash",
                "scriptfile-path": "hooks/notify.sh",
                "vcs-repo": {"identifier": "org/hooks", "branch": "main"}
            })
        );
    }

    #[test]
    fn test_hook_options_create_checks() {
        assert!(complete_options().validate_create().is_ok());

        for (field, options) in [
            (
                "scriptfile-path",
                HookOptions {
                    scriptfile_path: TriState::Unset,
                    ..complete_options()
                },
            ),
            (
                "vcs-repo",
                HookOptions {
                    vcs_repo: TriState::Null,
                    ..complete_options()
                },
            ),
            (
                "vcs-provider",
                HookOptions {
                    vcs_provider: TriState::Unset,
                    ..complete_options()
                },
            ),
        ] {
            match options.validate_create() {
                Err(ResourceError::RequiredField { field: missing, .. }) => {
                    assert_eq!(missing, field);
                }
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_hook_deserialization_from_api_response() {
        let hook: Hook = serde_json::from_value(json!({
            "id": "hook-1",
            "type": "hooks",
            "attributes": {
                "name": "notify",
                "interpreter": "bash",
                "scriptfile-path": "hooks/notify.sh",
                "vcs-repo": {"identifier": "org/hooks", "branch": "main"}
            },
            "relationships": {
                "vcs-provider": {"data": {"type": "vcs-providers", "id": "vcs-1"}}
            }
        }))
        .unwrap();

        assert_eq!(hook.attributes.scriptfile_path.as_deref(), Some("hooks/notify.sh"));
        assert_eq!(
            hook.relationships.vcs_provider.as_ref().and_then(|r| r.id()),
            Some("vcs-1")
        );
    }
}
