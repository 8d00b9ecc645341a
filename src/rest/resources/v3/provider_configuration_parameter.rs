//! Provider configuration parameter resource implementation.
//!
//! Parameters describe a custom provider configuration, one argument each.
//! They are listed and created under their configuration and addressed
//! directly afterwards:
//! - `provider-configurations/{provider_configuration}/parameters` (list, create)
//! - `provider-configuration-parameters/{id}` (read, update, delete)
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{
//!     ProviderConfigurationParameter, ProviderConfigurationParameterOptions, PROVIDER_CONFIGURATION,
//! };
//!
//! let options = ProviderConfigurationParameterOptions {
//!     key: "config_path".into(),
//!     value: "~/.kube/config".into(),
//!     ..Default::default()
//! };
//! let parameter = ProviderConfigurationParameter::create_with_parent(
//!     &client,
//!     PROVIDER_CONFIGURATION,
//!     "pcfg-123",
//!     &options,
//! )
//! .await?;
//!
//! let parameters = ProviderConfigurationParameter::iter_with_parent(
//!     &client,
//!     PROVIDER_CONFIGURATION,
//!     "pcfg-123",
//!     None,
//! )?
//! .collect_all()
//! .await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::jsonapi::{PageOptions, Relationship, Resource};
use crate::rest::{
    require_non_blank, ApiResource, ResourceError, ResourceOperation, ResourceOptions,
    ResourcePath,
};
use crate::value::TriState;
use crate::HttpMethod;

/// The parent placeholder of nested parameter paths.
pub const PROVIDER_CONFIGURATION: &str = "provider_configuration";

/// Attributes of a provider configuration parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationParameterAttributes {
    /// The provider argument name.
    pub key: Option<String>,

    /// The value. Omitted by the server for sensitive parameters.
    pub value: Option<String>,

    /// Whether the value is write-only.
    pub sensitive: Option<bool>,

    /// A free-form description.
    pub description: Option<String>,
}

/// Relationships of a provider configuration parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationParameterRelationships {
    /// The owning provider configuration.
    pub provider_configuration: Option<Relationship>,
}

/// An argument of a custom provider configuration.
pub type ProviderConfigurationParameter = Resource<
    ProviderConfigurationParameterAttributes,
    ProviderConfigurationParameterRelationships,
>;

impl ApiResource for ProviderConfigurationParameter {
    type Options = ProviderConfigurationParameterOptions;
    type ListOptions = ProviderConfigurationParameterListOptions;

    const NAME: &'static str = "ProviderConfigurationParameter";
    const TYPE: &'static str = "provider-configuration-parameters";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[PROVIDER_CONFIGURATION],
            "provider-configurations/{provider_configuration}/parameters",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[PROVIDER_CONFIGURATION],
            "provider-configurations/{provider_configuration}/parameters",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Read,
            &["id"],
            "provider-configuration-parameters/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "provider-configuration-parameters/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "provider-configuration-parameters/{id}",
        ),
    ];
}

/// Options for creating or updating a parameter.
///
/// `key` is required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationParameterOptions {
    /// The provider argument name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub key: TriState<String>,

    /// The value.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub value: TriState<String>,

    /// Whether the value is write-only.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub sensitive: TriState<bool>,

    /// A free-form description.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub description: TriState<String>,
}

impl ResourceOptions for ProviderConfigurationParameterOptions {
    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(ProviderConfigurationParameter::NAME, "key", &self.key)
    }
}

/// Parameters for listing the parameters of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderConfigurationParameterListOptions {
    /// Sort key, prefixed with `-` for descending order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Page to fetch.
    #[serde(flatten)]
    pub page: Option<PageOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{build_path, get_path};
    use std::collections::HashMap;

    #[test]
    fn test_parameter_list_requires_parent() {
        assert!(get_path(
            ProviderConfigurationParameter::PATHS,
            ResourceOperation::List,
            &[]
        )
        .is_none());

        let path = get_path(
            ProviderConfigurationParameter::PATHS,
            ResourceOperation::List,
            &[PROVIDER_CONFIGURATION],
        )
        .unwrap();

        let mut ids = HashMap::new();
        ids.insert(PROVIDER_CONFIGURATION, "pcfg-1");
        assert_eq!(
            build_path(path.template, &ids),
            "provider-configurations/pcfg-1/parameters"
        );
    }

    #[test]
    fn test_parameter_item_paths_are_flat() {
        for operation in [
            ResourceOperation::Read,
            ResourceOperation::Update,
            ResourceOperation::Delete,
        ] {
            let path = get_path(ProviderConfigurationParameter::PATHS, operation, &["id"]).unwrap();
            assert_eq!(path.template, "provider-configuration-parameters/{id}");
        }
    }

    #[test]
    fn test_parameter_options() {
        let options = ProviderConfigurationParameterOptions {
            key: "config_path".into(),
            sensitive: true.into(),
            ..Default::default()
        };
        assert!(options.validate_create().is_ok());
        assert!(options.relationships().is_empty());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"key": "config_path", "sensitive": true})
        );

        assert!(ProviderConfigurationParameterOptions::default()
            .validate_create()
            .is_err());
    }
}
