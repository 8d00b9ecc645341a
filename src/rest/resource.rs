//! The [`ApiResource`] trait for CRUD operations on Scalr resources.
//!
//! A resource binding is a [`Resource`](crate::jsonapi::Resource) type alias
//! plus an `ApiResource` implementation naming its JSON:API type, its paths
//! and its options types. The trait then provides `read()`, `list()`,
//! `iter()`, `create()`, `update()` and `delete()`.
//!
//! # Implementing a Resource
//!
//! 1. Define attribute and relationship structs with serde derives
//! 2. Define an options struct implementing [`ResourceOptions`] and a list
//!    options struct
//! 3. Implement `ApiResource` on the `Resource<Attributes, Relationships>`
//!    alias
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{NoRelationships, PageOptions, Resource};
//! use scalr_api::rest::{ApiResource, ResourceOperation, ResourceOptions, ResourcePath};
//! use scalr_api::{HttpMethod, TriState};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Deserialize)]
//! pub struct TagAttributes {
//!     pub name: Option<String>,
//! }
//!
//! pub type Tag = Resource<TagAttributes, NoRelationships>;
//!
//! #[derive(Debug, Clone, Default, Serialize)]
//! pub struct TagOptions {
//!     #[serde(skip_serializing_if = "TriState::is_unset")]
//!     pub name: TriState<String>,
//! }
//!
//! impl ResourceOptions for TagOptions {}
//!
//! #[derive(Debug, Clone, Default, Serialize)]
//! pub struct TagListOptions {
//!     #[serde(flatten)]
//!     pub page: Option<PageOptions>,
//! }
//!
//! impl ApiResource for Tag {
//!     type Options = TagOptions;
//!     type ListOptions = TagListOptions;
//!
//!     const NAME: &'static str = "Tag";
//!     const TYPE: &'static str = "tags";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Read, &["id"], "tags/{id}"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "tags"),
//!     ];
//! }
//!
//! // Usage:
//! let tag = Tag::read(&client, "tag-123", &[]).await?;
//! let tags = Tag::list(&client, None).await?;
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::RestClient;
use crate::jsonapi::{PageOptions, Payload, Relationship};
use crate::rest::{
    build_path, get_path, validate_id, Page, PageIterator, ResourceError, ResourceOperation,
    ResourcePath, ResourceResponse,
};
use crate::value::TriState;

/// The create/update options of a resource.
///
/// The options struct serializes to the `attributes` member of the request
/// document. Relationship fields are marked `#[serde(skip)]` and reported
/// through [`relationships`](Self::relationships) instead.
pub trait ResourceOptions: Serialize {
    /// Returns the relationships to send.
    ///
    /// `Unset` relationships are omitted, `Null` ones are sent as
    /// `{"data": null}`.
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        Vec::new()
    }

    /// Checks the fields required on create.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RequiredField`] for a missing field.
    fn validate_create(&self) -> Result<(), ResourceError> {
        Ok(())
    }

    /// Checks the options before an update.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] describing the rejected field.
    fn validate_update(&self) -> Result<(), ResourceError> {
        Ok(())
    }
}

/// A Scalr resource that can be read, listed, created, updated and deleted.
///
/// Implementors name the resource, its JSON:API type and the paths of the
/// operations it supports. Operations without a matching path fail with
/// [`ResourceError::PathResolutionFailed`] before any request is sent.
#[allow(async_fn_in_trait)]
pub trait ApiResource: DeserializeOwned + Clone + Send + Sync + Sized {
    /// Options for `create()` and `update()`.
    type Options: ResourceOptions + Send + Sync;

    /// Options for `list()` and `iter()` (filters, sorting, paging).
    type ListOptions: Serialize + Default + Clone + Send + Sync;

    /// The singular name used in error messages (e.g., "Workspace").
    const NAME: &'static str;

    /// The JSON:API resource type (e.g., "workspaces").
    const TYPE: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Reads a single resource by id.
    ///
    /// `include` names relationships to side-load; they are available
    /// through [`ResourceResponse::included_resource`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for a malformed id and
    /// [`ResourceError::NotFound`] if the resource doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let workspace = Workspace::read(&client, "ws-123", &["environment"]).await?;
    /// println!("Found: {:?}", workspace.attributes.name);
    /// ```
    async fn read(
        client: &RestClient,
        id: &str,
        include: &[&str],
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        validate_id(Self::NAME, id)?;

        let mut ids = HashMap::new();
        ids.insert("id", id);
        let path = resolve::<Self>(ResourceOperation::Read, &ids)?;

        let query = (!include.is_empty())
            .then(|| HashMap::from([("include".to_string(), include.join(","))]));

        let response = client
            .get(&path, query)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(id)))?;

        ResourceResponse::from_http_response(response, Self::NAME)
    }

    /// Lists one page of resources.
    ///
    /// Use [`iter()`](Self::iter) to walk every page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource cannot
    /// be listed without a parent.
    async fn list(
        client: &RestClient,
        options: Option<Self::ListOptions>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        let path = resolve::<Self>(ResourceOperation::List, &HashMap::new())?;
        let query = serialize_to_query(Self::NAME, &options.unwrap_or_default())?;
        fetch_list::<Self>(client, &path, query).await
    }

    /// Lists one page of resources nested under a parent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for a malformed parent id and
    /// [`ResourceError::PathResolutionFailed`] if no path takes `parent_name`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let parameters = ProviderConfigurationParameter::list_with_parent(
    ///     &client,
    ///     "provider_configuration",
    ///     "pcfg-123",
    ///     None,
    /// )
    /// .await?;
    /// ```
    async fn list_with_parent(
        client: &RestClient,
        parent_name: &str,
        parent_id: &str,
        options: Option<Self::ListOptions>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        validate_id(Self::NAME, parent_id)?;

        let mut ids = HashMap::new();
        ids.insert(parent_name, parent_id);
        let path = resolve::<Self>(ResourceOperation::List, &ids)?;
        let query = serialize_to_query(Self::NAME, &options.unwrap_or_default())?;
        fetch_list::<Self>(client, &path, query).await
    }

    /// Returns a lazy iterator over every matching resource.
    ///
    /// Paging starts at the page given in the options, or the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] or
    /// [`ResourceError::Encode`] before anything is fetched.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut workspaces = Workspace::iter(&client, None)?;
    /// while let Some(workspace) = workspaces.next().await {
    ///     println!("{}", workspace?.id);
    /// }
    /// ```
    fn iter<'a>(
        client: &'a RestClient,
        options: Option<Self::ListOptions>,
    ) -> Result<PageIterator<'a, Self>, ResourceError>
    where
        Self: 'a,
    {
        let path = resolve::<Self>(ResourceOperation::List, &HashMap::new())?;
        page_iterator::<Self>(client, path, &options.unwrap_or_default())
    }

    /// Returns a lazy iterator over the resources nested under a parent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for a malformed parent id and
    /// [`ResourceError::PathResolutionFailed`] if no path takes `parent_name`.
    fn iter_with_parent<'a>(
        client: &'a RestClient,
        parent_name: &str,
        parent_id: &str,
        options: Option<Self::ListOptions>,
    ) -> Result<PageIterator<'a, Self>, ResourceError>
    where
        Self: 'a,
    {
        validate_id(Self::NAME, parent_id)?;

        let mut ids = HashMap::new();
        ids.insert(parent_name, parent_id);
        let path = resolve::<Self>(ResourceOperation::List, &ids)?;
        page_iterator::<Self>(client, path, &options.unwrap_or_default())
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RequiredField`] if a field required on create
    /// is missing, and [`ResourceError::ValidationFailed`] if the server
    /// rejects the payload (422).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = EnvironmentOptions {
    ///     name: "production".into(),
    ///     ..Default::default()
    /// };
    /// let environment = Environment::create(&client, &options).await?;
    /// ```
    async fn create(
        client: &RestClient,
        options: &Self::Options,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        options.validate_create()?;

        let path = resolve::<Self>(ResourceOperation::Create, &HashMap::new())?;
        let body = build_payload::<Self>(None, options)?;
        let response = client
            .post(&path, body, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        ResourceResponse::from_http_response(response, Self::NAME)
    }

    /// Creates a resource nested under a parent.
    ///
    /// # Errors
    ///
    /// Same as [`create()`](Self::create), plus [`ResourceError::InvalidId`]
    /// for a malformed parent id.
    async fn create_with_parent(
        client: &RestClient,
        parent_name: &str,
        parent_id: &str,
        options: &Self::Options,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        validate_id(Self::NAME, parent_id)?;
        options.validate_create()?;

        let mut ids = HashMap::new();
        ids.insert(parent_name, parent_id);
        let path = resolve::<Self>(ResourceOperation::Create, &ids)?;
        let body = build_payload::<Self>(None, options)?;
        let response = client
            .post(&path, body, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, None))?;

        ResourceResponse::from_http_response(response, Self::NAME)
    }

    /// Updates a resource.
    ///
    /// Only fields that are not `Unset` are sent; `Null` fields clear the
    /// value on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for a malformed id and
    /// [`ResourceError::NotFound`] if the resource doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let options = WorkspaceOptions {
    ///     terraform_version: "1.9.0".into(),
    ///     working_directory: TriState::Null,
    ///     ..Default::default()
    /// };
    /// let workspace = Workspace::update(&client, "ws-123", &options).await?;
    /// ```
    async fn update(
        client: &RestClient,
        id: &str,
        options: &Self::Options,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        validate_id(Self::NAME, id)?;
        options.validate_update()?;

        let mut ids = HashMap::new();
        ids.insert("id", id);
        let path = resolve::<Self>(ResourceOperation::Update, &ids)?;
        let body = build_payload::<Self>(Some(id), options)?;
        let response = client
            .patch(&path, body, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(id)))?;

        ResourceResponse::from_http_response(response, Self::NAME)
    }

    /// Deletes a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for a malformed id and
    /// [`ResourceError::NotFound`] if the resource doesn't exist.
    async fn delete(client: &RestClient, id: &str) -> Result<(), ResourceError> {
        validate_id(Self::NAME, id)?;

        let mut ids = HashMap::new();
        ids.insert("id", id);
        let path = resolve::<Self>(ResourceOperation::Delete, &ids)?;

        client
            .delete(&path, None)
            .await
            .map_err(|e| ResourceError::from_rest_error(e, Self::NAME, Some(id)))?;

        Ok(())
    }
}

/// Resolves and interpolates the path of an operation.
fn resolve<R: ApiResource>(
    operation: ResourceOperation,
    ids: &HashMap<&str, &str>,
) -> Result<String, ResourceError> {
    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or(
        ResourceError::PathResolutionFailed {
            resource: R::NAME,
            operation: operation.as_str(),
        },
    )?;
    Ok(build_path(path.template, ids))
}

async fn fetch_list<R: ApiResource>(
    client: &RestClient,
    path: &str,
    query: HashMap<String, String>,
) -> Result<ResourceResponse<Vec<R>>, ResourceError> {
    let query = (!query.is_empty()).then_some(query);
    let response = client
        .get(path, query)
        .await
        .map_err(|e| ResourceError::from_rest_error(e, R::NAME, None))?;

    ResourceResponse::from_http_response(response, R::NAME)
}

fn page_iterator<'a, R: ApiResource + 'a>(
    client: &'a RestClient,
    path: String,
    options: &R::ListOptions,
) -> Result<PageIterator<'a, R>, ResourceError> {
    let mut query = serialize_to_query(R::NAME, options)?;
    let start = take_page_options(&mut query);

    Ok(PageIterator::new(start, move |page: PageOptions| {
        let path = path.clone();
        let mut query = query.clone();
        query.extend(page.to_query());
        Box::pin(async move {
            let response = fetch_list::<R>(client, &path, query).await?;
            let pagination = response.pagination().copied();
            Ok(Page {
                items: response.into_inner(),
                pagination,
            })
        })
    }))
}

/// Removes the paging keys from a query, returning them as page options.
fn take_page_options(query: &mut HashMap<String, String>) -> PageOptions {
    let defaults = PageOptions::default();
    let mut read = |key: &str, default: u32| {
        query
            .remove(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    };
    let number = read("page[number]", defaults.number);
    let size = read("page[size]", defaults.size);
    PageOptions::new(number, size)
}

/// Builds the request document for create and update.
fn build_payload<R: ApiResource>(
    id: Option<&str>,
    options: &R::Options,
) -> Result<Value, ResourceError> {
    let encode = |source| ResourceError::Encode {
        resource: R::NAME,
        source,
    };

    let attributes = serde_json::to_value(options).map_err(encode)?;
    let mut payload = Payload::new(R::TYPE, attributes);

    for (name, relationship) in options.relationships() {
        match relationship {
            TriState::Unset => {}
            TriState::Null => payload = payload.relationship(name, Relationship::null()),
            TriState::Value(relationship) => {
                for related_id in relationship.ids() {
                    validate_id(R::NAME, related_id)?;
                }
                payload = payload.relationship(name, relationship);
            }
        }
    }

    if let Some(id) = id {
        payload = payload.with_id(id);
    }

    serde_json::to_value(&payload).map_err(encode)
}

/// Serializes an options struct to a query parameter map.
///
/// Null values are skipped and arrays are joined with commas.
pub(crate) fn serialize_to_query<T: Serialize>(
    resource: &'static str,
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params)
        .map_err(|source| ResourceError::Encode { resource, source })?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
