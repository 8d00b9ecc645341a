//! Environment resource implementation.
//!
//! Environments group workspaces inside an account and carry the default
//! provider configurations, policy groups and tags inherited by them.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{Environment, EnvironmentListOptions, EnvironmentOptions};
//!
//! // Read a single environment
//! let environment = Environment::read(&client, "env-123", &[]).await?;
//! println!("Environment: {:?}", environment.attributes.name);
//!
//! // List environments by name
//! let options = EnvironmentListOptions {
//!     filter_name: Some("production".to_string()),
//!     ..Default::default()
//! };
//! let environments = Environment::list(&client, Some(options)).await?;
//!
//! // Create a new environment
//! let options = EnvironmentOptions {
//!     name: "staging".into(),
//!     account: "acc-123".into(),
//!     ..Default::default()
//! };
//! let environment = Environment::create(&client, &options).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

use super::common::{to_many, to_one};

/// The status of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentStatus {
    /// Runs can be queued.
    Active,
    /// The environment is locked.
    Inactive,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// Attributes of an environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentAttributes {
    /// The environment name, unique within the account.
    pub name: Option<String>,

    /// Whether cost estimation runs for workspaces in this environment.
    pub cost_estimation_enabled: Option<bool>,

    /// The environment status.
    pub status: Option<EnvironmentStatus>,

    /// When the environment was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationships of an environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentRelationships {
    /// The owning account.
    pub account: Option<Relationship>,

    /// The user who created the environment.
    pub created_by: Option<Relationship>,

    /// Provider configurations linked to new workspaces by default.
    pub default_provider_configurations: Option<Relationship>,

    /// Policy groups enforced in this environment.
    pub policy_groups: Option<Relationship>,

    /// Tags attached to the environment.
    pub tags: Option<Relationship>,
}

/// An environment in a Scalr account.
pub type Environment = Resource<EnvironmentAttributes, EnvironmentRelationships>;

impl ApiResource for Environment {
    type Options = EnvironmentOptions;
    type ListOptions = EnvironmentListOptions;

    const NAME: &'static str = "Environment";
    const TYPE: &'static str = "environments";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Read,
            &["id"],
            "environments/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "environments"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "environments",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "environments/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "environments/{id}",
        ),
    ];
}

/// Options for creating or updating an environment.
///
/// `name` and `account` are required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentOptions {
    /// The environment name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// Whether cost estimation is enabled.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub cost_estimation_enabled: TriState<bool>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// Default provider configuration ids.
    #[serde(skip)]
    pub default_provider_configurations: TriState<Vec<String>>,

    /// Policy group ids.
    #[serde(skip)]
    pub policy_groups: TriState<Vec<String>>,

    /// Tag ids.
    #[serde(skip)]
    pub tags: TriState<Vec<String>>,
}

impl ResourceOptions for EnvironmentOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            (
                "default-provider-configurations",
                to_many("provider-configurations", &self.default_provider_configurations),
            ),
            ("policy-groups", to_many("policy-groups", &self.policy_groups)),
            ("tags", to_many("tags", &self.tags)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Environment::NAME, "name", &self.name)?;
        require_non_blank(Environment::NAME, "account", &self.account)
    }
}

/// Parameters for listing environments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentListOptions {
    /// Filter by environment id; several ids are comma-joined.
    #[serde(rename = "filter[id]", skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<String>,

    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by tag id.
    #[serde(rename = "filter[tag]", skip_serializing_if = "Option::is_none")]
    pub filter_tag: Option<String>,

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
    use crate::rest::get_path;
    use serde_json::json;

    #[test]
    fn test_environment_deserialization_from_api_response() {
        let environment: Environment = serde_json::from_value(json!({
            "id": "env-v0o1",
            "type": "environments",
            "attributes": {
                "name": "production",
                "cost-estimation-enabled": true,
                "status": "active",
                "created-at": "2024-01-15T10:30:00Z"
            },
            "relationships": {
                "account": {"data": {"type": "accounts", "id": "acc-1"}},
                "tags": {"data": [{"type": "tags", "id": "tag-1"}]}
            }
        }))
        .unwrap();

        assert_eq!(environment.id, "env-v0o1");
        assert_eq!(environment.attributes.name.as_deref(), Some("production"));
        assert_eq!(environment.attributes.status, Some(EnvironmentStatus::Active));
        assert!(environment.attributes.created_at.is_some());
        assert_eq!(
            environment.relationships.account.as_ref().and_then(|r| r.id()),
            Some("acc-1")
        );
        assert_eq!(environment.relationships.tags.unwrap().ids(), vec!["tag-1"]);
    }

    #[test]
    fn test_unrecognised_status_decodes_as_unknown() {
        let status: EnvironmentStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, EnvironmentStatus::Unknown);
    }

    #[test]
    fn test_environment_options_create_checks() {
        let missing_account = EnvironmentOptions {
            name: "staging".into(),
            ..Default::default()
        };
        assert!(matches!(
            missing_account.validate_create(),
            Err(ResourceError::RequiredField {
                resource: "Environment",
                field: "account"
            })
        ));

        let blank_name = EnvironmentOptions {
            name: " ".into(),
            account: "acc-1".into(),
            ..Default::default()
        };
        assert!(blank_name.validate_create().is_err());

        let valid = EnvironmentOptions {
            name: "staging".into(),
            account: "acc-1".into(),
            ..Default::default()
        };
        assert!(valid.validate_create().is_ok());
    }

    #[test]
    fn test_environment_options_serialize_attributes_only() {
        let options = EnvironmentOptions {
            name: "staging".into(),
            cost_estimation_enabled: false.into(),
            account: "acc-1".into(),
            tags: TriState::Null,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"name": "staging", "cost-estimation-enabled": false})
        );

        let relationships = options.relationships();
        assert_eq!(relationships.len(), 4);
        assert!(relationships
            .iter()
            .any(|(name, rel)| *name == "account" && rel.is_set()));
        assert!(relationships
            .iter()
            .any(|(name, rel)| *name == "policy-groups" && rel.is_unset()));
    }

    #[test]
    fn test_environment_list_options() {
        let options = EnvironmentListOptions {
            filter_name: Some("production".to_string()),
            sort: Some("-name".to_string()),
            page: Some(PageOptions::new(2, 10)),
            ..Default::default()
        };

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["filter[name]"], "production");
        assert_eq!(json["sort"], "-name");
        assert_eq!(json["page[number]"], 2);
        assert!(json.get("filter[account]").is_none());
        assert!(json.get("include").is_none());
    }

    #[test]
    fn test_environment_paths() {
        let read = get_path(Environment::PATHS, ResourceOperation::Read, &["id"]).unwrap();
        assert_eq!(read.template, "environments/{id}");

        let update = get_path(Environment::PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(update.http_method, HttpMethod::Patch);

        assert!(get_path(Environment::PATHS, ResourceOperation::Delete, &[]).is_none());
    }
}
