//! Agent pool resource implementation.
//!
//! Agent pools group self-hosted agents that execute runs or VCS operations
//! inside a private network.

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

/// Attributes of an agent pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolAttributes {
    /// The pool name.
    pub name: Option<String>,

    /// Whether the pool serves VCS operations instead of runs.
    pub vcs_enabled: Option<bool>,

    /// Whether the pool is available to every environment.
    pub is_shared: Option<bool>,

    /// When the pool was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationships of an agent pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolRelationships {
    /// The owning account.
    pub account: Option<Relationship>,

    /// Environments that may use the pool.
    pub environments: Option<Relationship>,

    /// Workspaces running on the pool.
    pub workspaces: Option<Relationship>,

    /// Agents connected to the pool.
    pub agents: Option<Relationship>,
}

/// A pool of self-hosted agents.
pub type AgentPool = Resource<AgentPoolAttributes, AgentPoolRelationships>;

impl ApiResource for AgentPool {
    type Options = AgentPoolOptions;
    type ListOptions = AgentPoolListOptions;

    const NAME: &'static str = "AgentPool";
    const TYPE: &'static str = "agent-pools";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Read,
            &["id"],
            "agent-pools/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "agent-pools"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "agent-pools",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "agent-pools/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "agent-pools/{id}",
        ),
    ];
}

/// Options for creating or updating an agent pool.
///
/// `name` and `account` are required on create. `vcs-enabled` can only be
/// set on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolOptions {
    /// The pool name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// Whether the pool serves VCS operations instead of runs.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub vcs_enabled: TriState<bool>,

    /// Whether the pool is available to every environment.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub is_shared: TriState<bool>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// Ids of environments that may use the pool.
    #[serde(skip)]
    pub environments: TriState<Vec<String>>,
}

impl ResourceOptions for AgentPoolOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            ("environments", to_many("environments", &self.environments)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(AgentPool::NAME, "name", &self.name)?;
        require_non_blank(AgentPool::NAME, "account", &self.account)
    }
}

/// Parameters for listing agent pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentPoolListOptions {
    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by environment id.
    #[serde(rename = "filter[environment]", skip_serializing_if = "Option::is_none")]
    pub filter_environment: Option<String>,

    /// Filter by VCS flag.
    #[serde(rename = "filter[vcs-enabled]", skip_serializing_if = "Option::is_none")]
    pub filter_vcs_enabled: Option<bool>,

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
