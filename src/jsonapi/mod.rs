//! JSON:API document types.
//!
//! Scalr speaks JSON:API (`application/vnd.api+json`): every payload is a
//! document with a top-level `data`, optional `included`, `meta` and
//! `links`, or an `errors` array for failures.
//!
//! # Overview
//!
//! - [`Resource`]: A resource object with typed attributes and relationships
//! - [`Document`]: A response document wrapping one or many resources
//! - [`Relationship`] and [`ResourceIdentifier`]: Linkage between resources
//! - [`ErrorObject`] and [`ErrorDocument`]: Error responses
//! - [`Pagination`] and [`PageOptions`]: Page metadata and page requests
//! - [`Payload`]: A request document for create and update calls
//!
//! # Example
//!
//! ```rust
//! use scalr_api::jsonapi::{Document, Resource};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct TagAttributes {
//!     name: Option<String>,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct TagRelationships {}
//!
//! let body = r#"{
//!     "data": {"id": "tag-1", "type": "tags", "attributes": {"name": "prod"}},
//!     "meta": {}
//! }"#;
//!
//! let document: Document<Resource<TagAttributes, TagRelationships>> =
//!     serde_json::from_str(body).unwrap();
//! assert_eq!(document.data.id, "tag-1");
//! assert_eq!(document.data.attributes.name.as_deref(), Some("prod"));
//! ```

mod pagination;

pub use pagination::{PageOptions, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `links` object: link names mapped to URLs or link objects.
pub type Links = BTreeMap<String, serde_json::Value>;

/// Relationships keyed by name, as sent in request payloads.
pub type RelationshipMap = BTreeMap<String, Relationship>;

/// Identifies a single resource by type and id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type (e.g., "workspaces").
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id (e.g., "ws-v0o1...").
    pub id: String,
}

impl ResourceIdentifier {
    /// Creates a new resource identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// Resource linkage of a relationship: one identifier or a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage.
    One(ResourceIdentifier),
    /// To-many linkage.
    Many(Vec<ResourceIdentifier>),
}

/// A relationship object.
///
/// `data` is `None` for an empty to-one relationship (`"data": null`) and
/// for relationships the server only describes through `links`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// The resource linkage.
    #[serde(default)]
    pub data: Option<RelationshipData>,
    /// Related and self links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Relationship {
    /// Builds a to-one relationship.
    #[must_use]
    pub fn to_one(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: Some(RelationshipData::One(ResourceIdentifier::new(
                resource_type,
                id,
            ))),
            ..Self::default()
        }
    }

    /// Builds a to-many relationship of a single resource type.
    #[must_use]
    pub fn to_many<I, S>(resource_type: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers = ids
            .into_iter()
            .map(|id| ResourceIdentifier::new(resource_type, id))
            .collect();
        Self {
            data: Some(RelationshipData::Many(identifiers)),
            ..Self::default()
        }
    }

    /// Builds an empty relationship, which clears a to-one link on update.
    #[must_use]
    pub fn null() -> Self {
        Self::default()
    }

    /// Returns the linked identifier of a to-one relationship.
    #[must_use]
    pub const fn identifier(&self) -> Option<&ResourceIdentifier> {
        match &self.data {
            Some(RelationshipData::One(identifier)) => Some(identifier),
            _ => None,
        }
    }

    /// Returns the linked id of a to-one relationship.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.identifier().map(|identifier| identifier.id.as_str())
    }

    /// Returns the linked identifiers.
    ///
    /// A to-one relationship yields its single identifier.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match &self.data {
            Some(RelationshipData::One(identifier)) => vec![identifier],
            Some(RelationshipData::Many(identifiers)) => identifiers.iter().collect(),
            None => Vec::new(),
        }
    }

    /// Returns the linked ids.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.identifiers()
            .into_iter()
            .map(|identifier| identifier.id.as_str())
            .collect()
    }
}

/// Relationships type for resources that declare none.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoRelationships {}

/// A JSON:API resource object.
///
/// `A` holds the attributes and `R` the relationships. Both default when the
/// server omits them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource<A, R = NoRelationships> {
    /// The resource id.
    pub id: String,
    /// The resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource attributes.
    #[serde(default)]
    pub attributes: A,
    /// The resource relationships.
    #[serde(default)]
    pub relationships: R,
    /// Links of the resource itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl<A, R> Resource<A, R> {
    /// Returns the identifier of this resource.
    #[must_use]
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(&self.resource_type, &self.id)
    }
}

/// Top-level `meta` object of a response document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Pagination metadata of list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Any other meta members.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// A JSON:API response document.
///
/// `D` is a single [`Resource`] for read/create/update responses, or a
/// `Vec` of them for list responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    /// The primary data.
    pub data: D,
    /// Compound document members requested with `include`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<serde_json::Value>,
    /// Top-level meta information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Top-level links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl<D> Document<D> {
    /// Returns the pagination metadata, if present.
    #[must_use]
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|meta| meta.pagination.as_ref())
    }

    /// Resolves a relationship identifier against `included`.
    ///
    /// Returns `Ok(None)` if the identified resource was not included.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the included resource cannot be
    /// decoded as `T`.
    pub fn included_resource<T: DeserializeOwned>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Option<T>, serde_json::Error> {
        find_included(&self.included, identifier)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Decodes every included resource of the given type.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if any matching resource cannot be
    /// decoded as `T`.
    pub fn included_of_type<T: DeserializeOwned>(
        &self,
        resource_type: &str,
    ) -> Result<Vec<T>, serde_json::Error> {
        self.included
            .iter()
            .filter(|value| value.get("type").and_then(serde_json::Value::as_str) == Some(resource_type))
            .map(|value| serde_json::from_value(value.clone()))
            .collect()
    }
}

/// Finds an included resource by type and id.
pub(crate) fn find_included<'a>(
    included: &'a [serde_json::Value],
    identifier: &ResourceIdentifier,
) -> Option<&'a serde_json::Value> {
    included.iter().find(|value| {
        value.get("type").and_then(serde_json::Value::as_str)
            == Some(identifier.resource_type.as_str())
            && value.get("id").and_then(serde_json::Value::as_str) == Some(identifier.id.as_str())
    })
}

/// Where in the request an error originated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer to the offending value in the request document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// The offending query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// The offending request header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

/// A JSON:API error object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Unique identifier of this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP status code, as a string. Numeric values are accepted.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// Application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Where the problem originated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl ErrorObject {
    /// Returns the JSON Pointer of the offending value, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.pointer.as_deref())
    }
}

/// A JSON:API error document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    /// The error objects.
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A request document for create and update calls.
///
/// Serializes as `{"data": {"type": ..., "id": ..., "attributes": ...,
/// "relationships": ...}}`. `id` is omitted when `None`, `relationships`
/// when empty.
///
/// # Example
///
/// ```rust
/// use scalr_api::jsonapi::{Payload, Relationship};
/// use serde_json::json;
///
/// let payload = Payload::new("vars", json!({"key": "region", "value": "us-east-1"}))
///     .relationship("workspace", Relationship::to_one("workspaces", "ws-1"));
///
/// assert_eq!(
///     serde_json::to_value(&payload).unwrap(),
///     json!({"data": {
///         "type": "vars",
///         "attributes": {"key": "region", "value": "us-east-1"},
///         "relationships": {"workspace": {"data": {"type": "workspaces", "id": "ws-1"}}}
///     }})
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Payload<A, R = RelationshipMap> {
    /// The resource type.
    pub resource_type: String,
    /// The resource id, set for updates.
    pub id: Option<String>,
    /// The attributes to send.
    pub attributes: A,
    /// The relationships to send.
    pub relationships: R,
}

impl<A> Payload<A, RelationshipMap> {
    /// Creates a payload without id or relationships.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, attributes: A) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            attributes,
            relationships: RelationshipMap::new(),
        }
    }

    /// Adds a relationship.
    #[must_use]
    pub fn relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }
}

impl<A, R> Payload<A, R> {
    /// Sets the resource id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl<A: Serialize, R: Serialize> Serialize for Payload<A, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Data<'a, A, R> {
            #[serde(rename = "type")]
            resource_type: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<&'a str>,
            attributes: &'a A,
            #[serde(skip_serializing_if = "is_empty_object")]
            relationships: &'a R,
        }

        #[derive(Serialize)]
        struct Envelope<'a, A, R> {
            data: Data<'a, A, R>,
        }

        Envelope {
            data: Data {
                resource_type: &self.resource_type,
                id: self.id.as_deref(),
                attributes: &self.attributes,
                relationships: &self.relationships,
            },
        }
        .serialize(serializer)
    }
}

fn is_empty_object<R: Serialize>(value: &&R) -> bool {
    matches!(
        serde_json::to_value(value),
        Ok(serde_json::Value::Object(map)) if map.is_empty()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct VarAttributes {
        key: Option<String>,
        value: Option<String>,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct VarRelationships {
        workspace: Option<Relationship>,
        environment: Option<Relationship>,
    }

    type Var = Resource<VarAttributes, VarRelationships>;

    #[test]
    fn test_resource_deserializes_with_relationships() {
        let var: Var = serde_json::from_value(json!({
            "id": "var-1",
            "type": "vars",
            "attributes": {"key": "region", "value": "eu", "sensitive": false},
            "relationships": {
                "workspace": {"data": {"type": "workspaces", "id": "ws-1"}},
                "environment": {"data": null}
            },
            "links": {"self": "/api/iacp/v3/vars/var-1"}
        }))
        .unwrap();

        assert_eq!(var.id, "var-1");
        assert_eq!(var.attributes.key.as_deref(), Some("region"));
        let workspace = var.relationships.workspace.as_ref().unwrap();
        assert_eq!(workspace.id(), Some("ws-1"));
        assert!(var.relationships.environment.as_ref().unwrap().data.is_none());
        assert_eq!(var.identifier(), ResourceIdentifier::new("vars", "var-1"));
    }

    #[test]
    fn test_resource_without_attributes_or_relationships() {
        let var: Var = serde_json::from_value(json!({"id": "var-2", "type": "vars"})).unwrap();
        assert_eq!(var.attributes, VarAttributes::default());
        assert!(var.relationships.workspace.is_none());
    }

    #[test]
    fn test_to_many_relationship_ids() {
        let relationship: Relationship = serde_json::from_value(json!({
            "data": [
                {"type": "tags", "id": "tag-1"},
                {"type": "tags", "id": "tag-2"}
            ],
            "links": {"related": "/tags"}
        }))
        .unwrap();

        assert_eq!(relationship.ids(), vec!["tag-1", "tag-2"]);
        assert!(relationship.id().is_none());
        assert_eq!(relationship, {
            let mut expected = Relationship::to_many("tags", ["tag-1", "tag-2"]);
            expected.links = relationship.links.clone();
            expected
        });
    }

    #[test]
    fn test_relationship_serialization() {
        assert_eq!(
            serde_json::to_value(Relationship::to_one("environments", "env-1")).unwrap(),
            json!({"data": {"type": "environments", "id": "env-1"}})
        );
        assert_eq!(
            serde_json::to_value(Relationship::null()).unwrap(),
            json!({"data": null})
        );
    }

    #[test]
    fn test_document_with_included_and_pagination() {
        let document: Document<Vec<Var>> = serde_json::from_value(json!({
            "data": [{
                "id": "var-1",
                "type": "vars",
                "attributes": {"key": "a"},
                "relationships": {"workspace": {"data": {"type": "workspaces", "id": "ws-1"}}}
            }],
            "included": [
                {"id": "ws-1", "type": "workspaces", "attributes": {"name": "network"}},
                {"id": "env-1", "type": "environments", "attributes": {"name": "prod"}}
            ],
            "meta": {
                "pagination": {
                    "current-page": 1,
                    "prev-page": null,
                    "next-page": 2,
                    "total-pages": 2,
                    "total-count": 3
                },
                "policy-groups": 0
            }
        }))
        .unwrap();

        let pagination = document.pagination().unwrap();
        assert_eq!(pagination.next_page, Some(2));
        assert_eq!(pagination.total_count, 3);
        assert!(document.meta.as_ref().unwrap().other.contains_key("policy-groups"));

        let link = document.data[0].relationships.workspace.as_ref().unwrap();
        let workspace: serde_json::Value = document
            .included_resource(link.identifier().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(workspace["attributes"]["name"], "network");

        let missing: Option<serde_json::Value> = document
            .included_resource(&ResourceIdentifier::new("workspaces", "ws-404"))
            .unwrap();
        assert!(missing.is_none());

        let environments: Vec<Resource<serde_json::Value>> =
            document.included_of_type("environments").unwrap();
        assert_eq!(environments.len(), 1);
        assert_eq!(environments[0].id, "env-1");
    }

    #[test]
    fn test_error_document_accepts_numeric_status() {
        let document: ErrorDocument = serde_json::from_value(json!({
            "errors": [
                {"status": 422, "title": "Invalid", "source": {"pointer": "/data/attributes/name"}},
                {"status": "404", "title": "Not Found"}
            ]
        }))
        .unwrap();

        assert_eq!(document.errors[0].status.as_deref(), Some("422"));
        assert_eq!(document.errors[0].pointer(), Some("/data/attributes/name"));
        assert_eq!(document.errors[1].status.as_deref(), Some("404"));
    }

    #[test]
    fn test_payload_with_id_and_without_relationships() {
        let payload = Payload::new("tags", json!({"name": "prod"})).with_id("tag-1");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"data": {"type": "tags", "id": "tag-1", "attributes": {"name": "prod"}}})
        );
    }

    #[test]
    fn test_payload_clears_relationship_with_null() {
        let payload = Payload::new("workspaces", json!({}))
            .with_id("ws-1")
            .relationship("agent-pool", Relationship::null());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value["data"]["relationships"],
            json!({"agent-pool": {"data": null}})
        );
    }
}
