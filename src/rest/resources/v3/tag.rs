//! Tag resource implementation.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

use super::common::to_one;

/// Attributes of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttributes {
    /// The tag name, unique within the account.
    pub name: Option<String>,
}

/// Relationships of a tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagRelationships {
    /// The owning account.
    pub account: Option<Relationship>,
}

/// A tag attached to environments and workspaces.
pub type Tag = Resource<TagAttributes, TagRelationships>;

impl ApiResource for Tag {
    type Options = TagOptions;
    type ListOptions = TagListOptions;

    const NAME: &'static str = "Tag";
    const TYPE: &'static str = "tags";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "tags/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "tags"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "tags"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "tags/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "tags/{id}",
        ),
    ];
}

/// Options for creating or renaming a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagOptions {
    /// The tag name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,
}

impl ResourceOptions for TagOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![("account", to_one("accounts", &self.account))]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(Tag::NAME, "name", &self.name)?;
        require_non_blank(Tag::NAME, "account", &self.account)
    }

    fn validate_update(&self) -> Result<(), ResourceError> {
        // A tag cannot lose its name.
        if self.name.is_unset() {
            Ok(())
        } else {
            require_non_blank(Tag::NAME, "name", &self.name)
        }
    }
}

/// Parameters for listing tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagListOptions {
    /// Filter by tag id; several ids are comma-joined.
    #[serde(rename = "filter[id]", skip_serializing_if = "Option::is_none")]
    pub filter_id: Option<String>,

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

    /// Page to fetch.
    #[serde(flatten)]
    pub page: Option<PageOptions>,
}
