//! Variable resource implementation.
//!
//! Variables are Terraform input variables or shell environment variables
//! defined at account, environment or workspace scope. The scope is given by
//! the relationship that is set.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{Variable, VariableCategory, VariableListOptions, VariableOptions};
//!
//! let options = VariableOptions {
//!     key: "region".into(),
//!     value: "us-east-1".into(),
//!     category: VariableCategory::Terraform.into(),
//!     workspace: "ws-123".into(),
//!     ..Default::default()
//! };
//! let variable = Variable::create(&client, &options).await?;
//!
//! let options = VariableListOptions {
//!     filter_workspace: Some("ws-123".to_string()),
//!     ..Default::default()
//! };
//! let variables = Variable::iter(&client, Some(options))?.collect_all().await?;
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

use super::common::to_one;

/// The kind of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    /// A Terraform input variable.
    Terraform,
    /// A shell environment variable.
    Shell,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// Attributes of a variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VariableAttributes {
    /// The variable name.
    pub key: Option<String>,

    /// The value. Omitted by the server for sensitive variables.
    pub value: Option<String>,

    /// The kind of variable.
    pub category: Option<VariableCategory>,

    /// Whether the value is parsed as HCL.
    pub hcl: Option<bool>,

    /// Whether the value is write-only.
    pub sensitive: Option<bool>,

    /// Whether lower scopes are prevented from overriding the variable.
    #[serde(rename = "final")]
    pub is_final: Option<bool>,

    /// A free-form description.
    pub description: Option<String>,

    /// When the variable was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Relationships of a variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VariableRelationships {
    /// The account scope.
    pub account: Option<Relationship>,

    /// The environment scope.
    pub environment: Option<Relationship>,

    /// The workspace scope.
    pub workspace: Option<Relationship>,

    /// The user who last updated the variable.
    pub updated_by: Option<Relationship>,
}

/// A Terraform or shell variable.
pub type Variable = Resource<VariableAttributes, VariableRelationships>;

impl ApiResource for Variable {
    type Options = VariableOptions;
    type ListOptions = VariableListOptions;

    const NAME: &'static str = "Variable";
    const TYPE: &'static str = "vars";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "vars/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "vars"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "vars"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "vars/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "vars/{id}",
        ),
    ];
}

/// Options for creating or updating a variable.
///
/// `key` and `category` are required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VariableOptions {
    /// The variable name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub key: TriState<String>,

    /// The value.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub value: TriState<String>,

    /// The kind of variable.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub category: TriState<VariableCategory>,

    /// Whether the value is parsed as HCL.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub hcl: TriState<bool>,

    /// Whether the value is write-only.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub sensitive: TriState<bool>,

    /// Whether lower scopes are prevented from overriding the variable.
    #[serde(rename = "final", skip_serializing_if = "TriState::is_unset")]
    pub is_final: TriState<bool>,

    /// A free-form description.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub description: TriState<String>,

    /// The account scope id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// The environment scope id.
    #[serde(skip)]
    pub environment: TriState<String>,

    /// The workspace scope id.
    #[serde(skip)]
    pub workspace: TriState<String>,
}

impl ResourceOptions for VariableOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            ("environment", to_one("environments", &self.environment)),
            ("workspace", to_one("workspaces", &self.workspace)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Variable::NAME, "key", &self.key)?;
        require(Variable::NAME, "category", &self.category)
    }
}

/// Parameters for listing variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariableListOptions {
    /// Filter by variable id; several ids are comma-joined.
    #[serde(rename = "filter[var]", skip_serializing_if = "Option::is_none")]
    pub filter_var: Option<String>,

    /// Filter by key.
    #[serde(rename = "filter[key]", skip_serializing_if = "Option::is_none")]
    pub filter_key: Option<String>,

    /// Filter by category.
    #[serde(rename = "filter[category]", skip_serializing_if = "Option::is_none")]
    pub filter_category: Option<VariableCategory>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by environment id.
    #[serde(rename = "filter[environment]", skip_serializing_if = "Option::is_none")]
    pub filter_environment: Option<String>,

    /// Filter by workspace id.
    #[serde(rename = "filter[workspace]", skip_serializing_if = "Option::is_none")]
    pub filter_workspace: Option<String>,

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
