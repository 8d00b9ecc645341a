//! Team resource implementation.
//!
//! Teams group users for access policies. Teams synchronized from an
//! identity provider have their members managed there.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

use super::common::{to_many, to_one};

/// Attributes of a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TeamAttributes {
    /// The team name.
    pub name: Option<String>,

    /// A free-form description.
    pub description: Option<String>,
}

/// Relationships of a team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TeamRelationships {
    /// The owning account.
    pub account: Option<Relationship>,

    /// The identity provider the team is synchronized from.
    pub identity_provider: Option<Relationship>,

    /// Team members.
    pub users: Option<Relationship>,
}

/// A team of users.
pub type Team = Resource<TeamAttributes, TeamRelationships>;

impl ApiResource for Team {
    type Options = TeamOptions;
    type ListOptions = TeamListOptions;

    const NAME: &'static str = "Team";
    const TYPE: &'static str = "teams";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "teams/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "teams"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "teams"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "teams/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "teams/{id}",
        ),
    ];
}

/// Options for creating or updating a team.
///
/// `name` and `account` are required on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TeamOptions {
    /// The team name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// A free-form description.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub description: TriState<String>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// The identity provider id.
    #[serde(skip)]
    pub identity_provider: TriState<String>,

    /// Member user ids; `Null` removes every member.
    #[serde(skip)]
    pub users: TriState<Vec<String>>,
}

impl ResourceOptions for TeamOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            (
                "identity-provider",
                to_one("identity-providers", &self.identity_provider),
            ),
            ("users", to_many("users", &self.users)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Team::NAME, "name", &self.name)?;
        require_non_blank(Team::NAME, "account", &self.account)
    }
}

/// Parameters for listing teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamListOptions {
    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by identity provider id.
    #[serde(
        rename = "filter[identity-provider]",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_identity_provider: Option<String>,

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
