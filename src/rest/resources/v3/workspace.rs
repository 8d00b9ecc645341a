//! Workspace resource implementation.
//!
//! A workspace holds one Terraform or OpenTofu configuration and its state.
//! It always belongs to an environment.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{Workspace, WorkspaceListOptions, WorkspaceOptions};
//! use scalr_api::rest::resources::v3::common::VcsRepo;
//!
//! // Create a VCS-driven workspace
//! let options = WorkspaceOptions {
//!     name: "network".into(),
//!     environment: "env-123".into(),
//!     vcs_provider: "vcs-123".into(),
//!     vcs_repo: VcsRepo {
//!         identifier: Some("org/infrastructure".to_string()),
//!         branch: Some("main".to_string()),
//!         ..Default::default()
//!     }
//!     .into(),
//!     ..Default::default()
//! };
//! let workspace = Workspace::create(&client, &options).await?;
//!
//! // Iterate over every workspace of an environment
//! let options = WorkspaceListOptions {
//!     filter_environment: Some("env-123".to_string()),
//!     ..Default::default()
//! };
//! let mut workspaces = Workspace::iter(&client, Some(options))?;
//! while let Some(workspace) = workspaces.next().await {
//!     println!("{}", workspace?.id);
//! }
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

use super::common::{to_many, to_one, VcsRepo};

/// Where runs of a workspace are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Runs execute on Scalr or agent infrastructure.
    Remote,
    /// Runs execute on the caller's machine; Scalr only stores state.
    Local,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// The infrastructure-as-code tool of a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IacPlatform {
    /// HashiCorp Terraform.
    Terraform,
    /// OpenTofu.
    Opentofu,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// When runs are queued automatically after configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoQueueRuns {
    /// Every change except the first upload queues a run.
    SkipFirst,
    /// Every change queues a run.
    Always,
    /// Runs are never queued automatically.
    Never,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// The lifecycle stage a workspace represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceEnvironmentType {
    /// Production.
    Production,
    /// Staging.
    Staging,
    /// Testing.
    Testing,
    /// Development.
    Development,
    /// Not mapped to a stage.
    Unmapped,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// Attributes of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceAttributes {
    /// The workspace name, unique within the environment.
    pub name: Option<String>,

    /// Whether successful plans are applied without confirmation.
    pub auto_apply: Option<bool>,

    /// Whether new runs always use the latest configuration version.
    pub force_latest_run: Option<bool>,

    /// Whether the workspace refuses deletion while it manages resources.
    pub deletion_protection_enabled: Option<bool>,

    /// Where runs execute.
    pub execution_mode: Option<ExecutionMode>,

    /// The IaC tool.
    pub iac_platform: Option<IacPlatform>,

    /// The Terraform or OpenTofu version.
    pub terraform_version: Option<String>,

    /// The directory runs execute in, relative to the configuration root.
    pub working_directory: Option<String>,

    /// The lifecycle stage.
    #[serde(rename = "type")]
    pub environment_type: Option<WorkspaceEnvironmentType>,

    /// Automatic run queueing.
    pub auto_queue_runs: Option<AutoQueueRuns>,

    /// The VCS binding, for VCS-driven workspaces.
    pub vcs_repo: Option<VcsRepo>,

    /// Run timeout in minutes.
    pub run_operation_timeout: Option<u32>,

    /// Variable files passed to every run.
    pub var_files: Option<Vec<String>>,

    /// Whether the workspace manages any resources.
    pub has_resources: Option<bool>,

    /// Whether the workspace is locked.
    pub locked: Option<bool>,

    /// When the workspace was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationships of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceRelationships {
    /// The owning environment.
    pub environment: Option<Relationship>,

    /// The VCS provider of a VCS-driven workspace.
    pub vcs_provider: Option<Relationship>,

    /// The agent pool running the workspace.
    pub agent_pool: Option<Relationship>,

    /// The module version the workspace is created from.
    pub module_version: Option<Relationship>,

    /// The latest run.
    pub latest_run: Option<Relationship>,

    /// The user who created the workspace.
    pub created_by: Option<Relationship>,

    /// Tags attached to the workspace.
    pub tags: Option<Relationship>,
}

/// A workspace in a Scalr environment.
pub type Workspace = Resource<WorkspaceAttributes, WorkspaceRelationships>;

impl ApiResource for Workspace {
    type Options = WorkspaceOptions;
    type ListOptions = WorkspaceListOptions;

    const NAME: &'static str = "Workspace";
    const TYPE: &'static str = "workspaces";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Read,
            &["id"],
            "workspaces/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "workspaces"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "workspaces"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "workspaces/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "workspaces/{id}",
        ),
    ];
}

/// Options for creating or updating a workspace.
///
/// `name` and `environment` are required on create. A VCS repository needs
/// a VCS provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceOptions {
    /// The workspace name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// Whether successful plans are applied without confirmation.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub auto_apply: TriState<bool>,

    /// Whether new runs always use the latest configuration version.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub force_latest_run: TriState<bool>,

    /// Whether deletion protection is enabled.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub deletion_protection_enabled: TriState<bool>,

    /// Where runs execute.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub execution_mode: TriState<ExecutionMode>,

    /// The IaC tool.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub iac_platform: TriState<IacPlatform>,

    /// The Terraform or OpenTofu version.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub terraform_version: TriState<String>,

    /// The working directory; `Null` resets it to the configuration root.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub working_directory: TriState<String>,

    /// The lifecycle stage.
    #[serde(rename = "type", skip_serializing_if = "TriState::is_unset")]
    pub environment_type: TriState<WorkspaceEnvironmentType>,

    /// Automatic run queueing.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub auto_queue_runs: TriState<AutoQueueRuns>,

    /// The VCS binding; `Null` detaches the repository.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub vcs_repo: TriState<VcsRepo>,

    /// Run timeout in minutes.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub run_operation_timeout: TriState<u32>,

    /// Variable files passed to every run.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub var_files: TriState<Vec<String>>,

    /// The owning environment id.
    #[serde(skip)]
    pub environment: TriState<String>,

    /// The VCS provider id.
    #[serde(skip)]
    pub vcs_provider: TriState<String>,

    /// The agent pool id; `Null` moves runs back to Scalr runners.
    #[serde(skip)]
    pub agent_pool: TriState<String>,

    /// The module version id.
    #[serde(skip)]
    pub module_version: TriState<String>,

    /// Tag ids.
    #[serde(skip)]
    pub tags: TriState<Vec<String>>,
}

impl ResourceOptions for WorkspaceOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("environment", to_one("environments", &self.environment)),
            ("vcs-provider", to_one("vcs-providers", &self.vcs_provider)),
            ("agent-pool", to_one("agent-pools", &self.agent_pool)),
            ("module-version", to_one("module-versions", &self.module_version)),
            ("tags", to_many("tags", &self.tags)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Workspace::NAME, "name", &self.name)?;
        require_non_blank(Workspace::NAME, "environment", &self.environment)?;
        self.validate_update()
    }

    fn validate_update(&self) -> Result<(), ResourceError> {
        if self.vcs_repo.is_set() {
            require(Workspace::NAME, "vcs-provider", &self.vcs_provider)?;
        }
        if let TriState::Value(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ResourceError::RequiredField {
                    resource: Workspace::NAME,
                    field: "name",
                });
            }
        }
        Ok(())
    }
}

/// Parameters for listing workspaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkspaceListOptions {
    /// Filter by workspace id; several ids are comma-joined.
    #[serde(rename = "filter[id]", skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<String>,

    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by environment id.
    #[serde(rename = "filter[environment]", skip_serializing_if = "Option::is_none")]
    pub filter_environment: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by tag id.
    #[serde(rename = "filter[tag]", skip_serializing_if = "Option::is_none")]
    pub filter_tag: Option<String>,

    /// Filter by agent pool id.
    #[serde(rename = "filter[agent-pool]", skip_serializing_if = "Option::is_none")]
    pub filter_agent_pool: Option<String>,

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

    #[test]
    fn test_unrecognised_enum_values_decode_as_unknown() {
        let attributes: WorkspaceAttributes = serde_json::from_value(json!({
            "execution-mode": "agent",
            "iac-platform": "pulumi",
            "environment-type": "sandbox",
            "auto-queue-runs": "sometimes"
        }))
        .unwrap();

        assert_eq!(attributes.execution_mode, Some(ExecutionMode::Unknown));
        assert_eq!(attributes.iac_platform, Some(IacPlatform::Unknown));
        assert_eq!(
            attributes.environment_type,
            Some(WorkspaceEnvironmentType::Unknown)
        );
        assert_eq!(attributes.auto_queue_runs, Some(AutoQueueRuns::Unknown));
    }

    #[test]
    fn test_workspace_deserialization_from_api_response() {
        let workspace: Workspace = serde_json::from_value(json!({
            "id": "ws-v0o2",
            "type": "workspaces",
            "attributes": {
                "name": "network",
                "auto-apply": false,
                "execution-mode": "remote",
                "iac-platform": "opentofu",
                "terraform-version": "1.6.0",
                "working-directory": null,
                "type": "production",
                "auto-queue-runs": "skip-first",
                "vcs-repo": {"identifier": "org/infra", "branch": "main", "dry-runs-enabled": true},
                "run-operation-timeout": 60,
                "var-files": ["prod.tfvars"],
                "created-at": "2024-03-01T08:00:00Z"
            },
            "relationships": {
                "environment": {"data": {"type": "environments", "id": "env-1"}},
                "agent-pool": {"data": null},
                "tags": {"data": []}
            }
        }))
        .unwrap();

        let attributes = &workspace.attributes;
        assert_eq!(attributes.execution_mode, Some(ExecutionMode::Remote));
        assert_eq!(attributes.iac_platform, Some(IacPlatform::Opentofu));
        assert_eq!(
            attributes.environment_type,
            Some(WorkspaceEnvironmentType::Production)
        );
        assert_eq!(attributes.auto_queue_runs, Some(AutoQueueRuns::SkipFirst));
        assert!(attributes.working_directory.is_none());
        assert_eq!(
            attributes.vcs_repo.as_ref().and_then(|r| r.branch.as_deref()),
            Some("main")
        );

        let relationships = &workspace.relationships;
        assert_eq!(
            relationships.environment.as_ref().and_then(|r| r.id()),
            Some("env-1")
        );
        assert!(relationships.agent_pool.as_ref().unwrap().data.is_none());
        assert!(relationships.tags.as_ref().unwrap().ids().is_empty());
    }

    #[test]
    fn test_workspace_options_partial_update() {
        let options = WorkspaceOptions {
            auto_apply: true.into(),
            working_directory: TriState::Null,
            environment_type: WorkspaceEnvironmentType::Staging.into(),
            agent_pool: TriState::Null,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"auto-apply": true, "working-directory": null, "type": "staging"})
        );
        assert!(options.validate_update().is_ok());

        let agent_pool = options
            .relationships()
            .into_iter()
            .find(|(name, _)| *name == "agent-pool")
            .unwrap()
            .1;
        assert!(agent_pool.is_null());
    }

    #[test]
    fn test_workspace_options_create_checks() {
        let missing_environment = WorkspaceOptions {
            name: "network".into(),
            ..Default::default()
        };
        assert!(matches!(
            missing_environment.validate_create(),
            Err(ResourceError::RequiredField {
                field: "environment",
                ..
            })
        ));

        let vcs_without_provider = WorkspaceOptions {
            name: "network".into(),
            environment: "env-1".into(),
            vcs_repo: VcsRepo::default().into(),
            ..Default::default()
        };
        assert!(matches!(
            vcs_without_provider.validate_create(),
            Err(ResourceError::RequiredField {
                field: "vcs-provider",
                ..
            })
        ));

        let valid = WorkspaceOptions {
            name: "network".into(),
            environment: "env-1".into(),
            ..Default::default()
        };
        assert!(valid.validate_create().is_ok());
    }

    #[test]
    fn test_workspace_options_update_rejects_blank_name() {
        let options = WorkspaceOptions {
            name: "".into(),
            ..Default::default()
        };
        assert!(options.validate_update().is_err());
    }

    #[test]
    fn test_workspace_list_options() {
        let options = WorkspaceListOptions {
            filter_environment: Some("env-1".to_string()),
            filter_agent_pool: Some("apool-1".to_string()),
            include: vec!["environment".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["filter[environment]"], "env-1");
        assert_eq!(json["filter[agent-pool]"], "apool-1");
        assert_eq!(json["include"], json!(["environment"]));
        assert!(json.get("page[number]").is_none());
    }
}
