//! Response wrapper for REST resource operations.
//!
//! [`ResourceResponse<T>`] combines the decoded `data` of a JSON:API
//! document with its pagination metadata, included resources and request
//! id. It implements `Deref<Target = T>`:
//!
//! ```rust,ignore
//! let response = Workspace::list(&client, None).await?;
//!
//! for workspace in response.iter() {
//!     println!("{:?}", workspace.attributes.name);
//! }
//!
//! if response.has_next_page() {
//!     // Fetch the next page...
//! }
//!
//! let workspaces = response.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::clients::HttpResponse;
use crate::jsonapi::{find_included, Document, Pagination, ResourceIdentifier};
use crate::rest::ResourceError;

/// A response from a REST resource operation.
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::ResourceResponse;
/// use scalr_api::jsonapi::Pagination;
///
/// let response = ResourceResponse::new(
///     vec!["ws-1", "ws-2"],
///     Some(Pagination {
///         current_page: 1,
///         next_page: Some(2),
///         total_pages: 2,
///         total_count: 4,
///         ..Pagination::default()
///     }),
///     Vec::new(),
///     Some("req-123".to_string()),
/// );
///
/// assert_eq!(response.len(), 2);
/// assert!(response.has_next_page());
/// assert_eq!(response.total_count(), Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    pagination: Option<Pagination>,
    included: Vec<serde_json::Value>,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(
        data: T,
        pagination: Option<Pagination>,
        included: Vec<serde_json::Value>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            data,
            pagination,
            included,
            request_id,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns a mutable reference to the inner data.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the pagination metadata, if the response carried any.
    #[must_use]
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Returns `true` if there is a next page of results.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_next)
    }

    /// Returns the number of the next page, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.pagination.as_ref().and_then(|p| p.next_page)
    }

    /// Returns the total number of items across all pages, if known.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.pagination.as_ref().map(|p| p.total_count)
    }

    /// Returns the raw included resources.
    #[must_use]
    pub fn included(&self) -> &[serde_json::Value] {
        &self.included
    }

    /// Resolves a relationship identifier against the included resources.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the included resource cannot be
    /// decoded as `R`.
    pub fn included_resource<R: DeserializeOwned>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Option<R>, serde_json::Error> {
        find_included(&self.included, identifier)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Returns the request ID, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Transforms the inner data, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceResponse<U> {
        ResourceResponse {
            data: f(self.data),
            pagination: self.pagination,
            included: self.included,
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes a JSON:API document from an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the body is not a document whose
    /// `data` decodes as `T`.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ResourceError> {
        let request_id = response.request_id().map(ToString::to_string);
        let document: Document<T> = serde_json::from_value(response.body)
            .map_err(|source| ResourceError::Decode { resource, source })?;
        let pagination = document.pagination().copied();

        Ok(Self {
            data: document.data,
            pagination,
            included: document.included,
            request_id,
        })
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::{Relationship, Resource};
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Default, Deserialize)]
    struct Attributes {
        name: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Relationships {
        environment: Option<Relationship>,
    }

    type Workspace = Resource<Attributes, Relationships>;

    fn http_response(body: serde_json::Value) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-7".to_string()]);
        HttpResponse::new(200, headers, body)
    }

    #[test]
    fn test_from_http_response_single_resource() {
        let response: ResourceResponse<Workspace> = ResourceResponse::from_http_response(
            http_response(json!({
                "data": {
                    "id": "ws-1",
                    "type": "workspaces",
                    "attributes": {"name": "network"},
                    "relationships": {"environment": {"data": {"type": "environments", "id": "env-1"}}}
                },
                "included": [{"id": "env-1", "type": "environments", "attributes": {"name": "prod"}}]
            })),
            "Workspace",
        )
        .unwrap();

        assert_eq!(response.id, "ws-1");
        assert_eq!(response.attributes.name.as_deref(), Some("network"));
        assert_eq!(response.request_id(), Some("req-7"));
        assert!(response.pagination().is_none());

        let link = response.relationships.environment.as_ref().unwrap();
        let environment: Resource<serde_json::Value> = response
            .included_resource(link.identifier().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(environment.attributes["name"], "prod");
    }

    #[test]
    fn test_from_http_response_list_with_pagination() {
        let response: ResourceResponse<Vec<Workspace>> = ResourceResponse::from_http_response(
            http_response(json!({
                "data": [
                    {"id": "ws-1", "type": "workspaces", "attributes": {}},
                    {"id": "ws-2", "type": "workspaces", "attributes": {}}
                ],
                "meta": {"pagination": {
                    "current-page": 1, "prev-page": null, "next-page": 2,
                    "total-pages": 3, "total-count": 5
                }}
            })),
            "Workspace",
        )
        .unwrap();

        assert_eq!(response.len(), 2);
        assert!(response.has_next_page());
        assert_eq!(response.next_page(), Some(2));
        assert_eq!(response.total_count(), Some(5));
    }

    #[test]
    fn test_from_http_response_rejects_non_document() {
        let result: Result<ResourceResponse<Workspace>, _> =
            ResourceResponse::from_http_response(http_response(json!({"id": "ws-1"})), "Workspace");
        assert!(matches!(
            result,
            Err(ResourceError::Decode {
                resource: "Workspace",
                ..
            })
        ));
    }

    #[test]
    fn test_map_and_deref_mut() {
        let mut response = ResourceResponse::new(vec![1, 2], None, Vec::new(), None);
        response.push(3);
        let mapped = response.map(|v| v.len());
        assert_eq!(*mapped, 3);
        assert!(!mapped.has_next_page());
        assert!(mapped.total_count().is_none());
    }
}
