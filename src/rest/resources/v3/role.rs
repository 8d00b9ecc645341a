//! Role resource implementation.
//!
//! Roles are named sets of permissions granted through access policies.
//! System roles are predefined and cannot be changed.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

use super::common::{to_many, to_one};

/// Attributes of a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleAttributes {
    /// The role name.
    pub name: Option<String>,

    /// A free-form description.
    pub description: Option<String>,

    /// Whether the role is predefined.
    pub is_system: Option<bool>,
}

/// Relationships of a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleRelationships {
    /// The owning account. Empty for system roles.
    pub account: Option<Relationship>,

    /// The permissions granted by the role.
    pub permissions: Option<Relationship>,
}

/// A role.
pub type Role = Resource<RoleAttributes, RoleRelationships>;

impl ApiResource for Role {
    type Options = RoleOptions;
    type ListOptions = RoleListOptions;

    const NAME: &'static str = "Role";
    const TYPE: &'static str = "roles";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "roles/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "roles"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "roles"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "roles/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "roles/{id}",
        ),
    ];
}

/// Options for creating or updating a role.
///
/// `name` and `account` are required on create. Permissions are permission
/// ids such as `workspaces:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleOptions {
    /// The role name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// A free-form description.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub description: TriState<String>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// Permission ids; `Null` removes every permission.
    #[serde(skip)]
    pub permissions: TriState<Vec<String>>,
}

impl ResourceOptions for RoleOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            ("permissions", to_many("permissions", &self.permissions)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Role::NAME, "name", &self.name)?;
        require_non_blank(Role::NAME, "account", &self.account)
    }
}

/// Parameters for listing roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleListOptions {
    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by system flag.
    #[serde(rename = "filter[is-system]", skip_serializing_if = "Option::is_none")]
    pub filter_is_system: Option<bool>,

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
