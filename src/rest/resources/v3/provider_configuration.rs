//! Provider configuration resource implementation.
//!
//! A provider configuration stores the credentials of one Terraform
//! provider and the environments it is shared with. Built-in support covers
//! AWS, AzureRM, Google and Scalr; any other provider is a custom
//! configuration described by its
//! [parameters](super::ProviderConfigurationParameter).
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::rest::ApiResource;
//! use scalr_api::rest::resources::v3::{ProviderConfiguration, ProviderConfigurationOptions};
//!
//! let options = ProviderConfigurationOptions {
//!     name: "aws-prod".into(),
//!     provider_name: "aws".into(),
//!     aws_credentials_type: AwsCredentialsType::RoleDelegation.into(),
//!     aws_role_arn: "arn:aws:iam::123456789012:role/scalr".into(),
//!     account: "acc-123".into(),
//!     environments: vec!["env-123".to_string()].into(),
//!     ..Default::default()
//! };
//! let configuration = ProviderConfiguration::create(&client, &options).await?;
//! ```

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

/// How AWS credentials are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwsCredentialsType {
    /// Static access keys.
    AccessKeys,
    /// An assumed IAM role.
    RoleDelegation,
    /// OIDC federation.
    Oidc,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// How Azure credentials are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzurermAuthType {
    /// A client secret.
    ClientSecrets,
    /// OIDC federation.
    Oidc,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// How Google credentials are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoogleAuthType {
    /// A service account key.
    ServiceAccountKey,
    /// OIDC federation.
    Oidc,
    /// A value not known to this version of the SDK.
    #[serde(other)]
    Unknown,
}

/// Attributes of a provider configuration.
///
/// Secrets (`aws-secret-key`, `azurerm-client-secret`, `google-credentials`,
/// `scalr-token`) are write-only and never returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationAttributes {
    /// The configuration name.
    pub name: Option<String>,

    /// The Terraform provider name (e.g., `aws`, `kubernetes`).
    pub provider_name: Option<String>,

    /// Whether credentials are also exported as shell variables.
    pub export_shell_variables: Option<bool>,

    /// Whether the configuration is shared with every environment.
    pub is_shared: Option<bool>,

    /// Whether the configuration is described by parameters.
    pub is_custom: Option<bool>,

    /// The AWS partition (e.g., `regular`, `gov-cloud`).
    pub aws_account_type: Option<String>,

    /// How AWS credentials are obtained.
    pub aws_credentials_type: Option<AwsCredentialsType>,

    /// The AWS access key id.
    pub aws_access_key: Option<String>,

    /// The IAM role to assume.
    pub aws_role_arn: Option<String>,

    /// The external id for role assumption.
    pub aws_external_id: Option<String>,

    /// The OIDC audience for AWS.
    pub aws_audience: Option<String>,

    /// How Azure credentials are obtained.
    pub azurerm_auth_type: Option<AzurermAuthType>,

    /// The Azure client id.
    pub azurerm_client_id: Option<String>,

    /// The Azure subscription id.
    pub azurerm_subscription_id: Option<String>,

    /// The Azure tenant id.
    pub azurerm_tenant_id: Option<String>,

    /// How Google credentials are obtained.
    pub google_auth_type: Option<GoogleAuthType>,

    /// The Google project.
    pub google_project: Option<String>,

    /// The Google service account email for OIDC.
    pub google_service_account_email: Option<String>,

    /// The Scalr hostname for the Scalr provider.
    pub scalr_hostname: Option<String>,

    /// When the configuration was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationships of a provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationRelationships {
    /// The owning account.
    pub account: Option<Relationship>,

    /// Environments the configuration is shared with.
    pub environments: Option<Relationship>,

    /// Teams owning the configuration.
    pub owners: Option<Relationship>,

    /// Parameters of a custom configuration.
    pub parameters: Option<Relationship>,
}

/// A provider configuration.
pub type ProviderConfiguration =
    Resource<ProviderConfigurationAttributes, ProviderConfigurationRelationships>;

impl ApiResource for ProviderConfiguration {
    type Options = ProviderConfigurationOptions;
    type ListOptions = ProviderConfigurationListOptions;

    const NAME: &'static str = "ProviderConfiguration";
    const TYPE: &'static str = "provider-configurations";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Read,
            &["id"],
            "provider-configurations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[],
            "provider-configurations",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "provider-configurations",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "provider-configurations/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "provider-configurations/{id}",
        ),
    ];
}

/// Options for creating or updating a provider configuration.
///
/// `name`, `provider-name` and `account` are required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfigurationOptions {
    /// The configuration name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub name: TriState<String>,

    /// The Terraform provider name.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub provider_name: TriState<String>,

    /// Whether credentials are also exported as shell variables.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub export_shell_variables: TriState<bool>,

    /// Whether the configuration is shared with every environment.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub is_shared: TriState<bool>,

    /// Whether the configuration is described by parameters.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub is_custom: TriState<bool>,

    /// The AWS partition.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_account_type: TriState<String>,

    /// How AWS credentials are obtained.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_credentials_type: TriState<AwsCredentialsType>,

    /// The AWS access key id.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_access_key: TriState<String>,

    /// The AWS secret access key.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_secret_key: TriState<String>,

    /// The IAM role to assume.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_role_arn: TriState<String>,

    /// The external id for role assumption.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_external_id: TriState<String>,

    /// The OIDC audience for AWS.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub aws_audience: TriState<String>,

    /// How Azure credentials are obtained.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub azurerm_auth_type: TriState<AzurermAuthType>,

    /// The Azure client id.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub azurerm_client_id: TriState<String>,

    /// The Azure client secret.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub azurerm_client_secret: TriState<String>,

    /// The Azure subscription id.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub azurerm_subscription_id: TriState<String>,

    /// The Azure tenant id.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub azurerm_tenant_id: TriState<String>,

    /// How Google credentials are obtained.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub google_auth_type: TriState<GoogleAuthType>,

    /// The Google project.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub google_project: TriState<String>,

    /// The Google service account key JSON.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub google_credentials: TriState<String>,

    /// The Google service account email for OIDC.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub google_service_account_email: TriState<String>,

    /// The Scalr hostname for the Scalr provider.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub scalr_hostname: TriState<String>,

    /// The Scalr token for the Scalr provider.
    #[serde(skip_serializing_if = "TriState::is_unset")]
    pub scalr_token: TriState<String>,

    /// The owning account id.
    #[serde(skip)]
    pub account: TriState<String>,

    /// Ids of environments to share with.
    #[serde(skip)]
    pub environments: TriState<Vec<String>>,

    /// Ids of owning teams.
    #[serde(skip)]
    pub owners: TriState<Vec<String>>,
}

impl ResourceOptions for ProviderConfigurationOptions {
    fn relationships(&self) -> Vec<(&'static str, TriState<Relationship>)> {
        vec![
            ("account", to_one("accounts", &self.account)),
            ("environments", to_many("environments", &self.environments)),
            ("owners", to_many("teams", &self.owners)),
        ]
    }

    fn validate_create(&self) -> Result<(), ResourceError> {
        require_non_blank(ProviderConfiguration::NAME, "name", &self.name)?;
        require_non_blank(
            ProviderConfiguration::NAME,
            "provider-name",
            &self.provider_name,
        )?;
        require_non_blank(ProviderConfiguration::NAME, "account", &self.account)
    }
}

/// Parameters for listing provider configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderConfigurationListOptions {
    /// Filter by exact name.
    #[serde(rename = "filter[name]", skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,

    /// Filter by provider name.
    #[serde(rename = "filter[provider-name]", skip_serializing_if = "Option::is_none")]
    pub filter_provider_name: Option<String>,

    /// Filter by account id.
    #[serde(rename = "filter[account]", skip_serializing_if = "Option::is_none")]
    pub filter_account: Option<String>,

    /// Filter by environment id.
    #[serde(rename = "filter[environment]", skip_serializing_if = "Option::is_none")]
    pub filter_environment: Option<String>,

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
    fn test_unrecognised_credential_types_decode_as_unknown() {
        let aws: AwsCredentialsType = serde_json::from_value(json!("web_identity")).unwrap();
        let azure: AzurermAuthType = serde_json::from_value(json!("managed_identity")).unwrap();
        let google: GoogleAuthType = serde_json::from_value(json!("workload_identity")).unwrap();

        assert_eq!(aws, AwsCredentialsType::Unknown);
        assert_eq!(azure, AzurermAuthType::Unknown);
        assert_eq!(google, GoogleAuthType::Unknown);
        assert_eq!(
            serde_json::from_value::<AwsCredentialsType>(json!("oidc")).unwrap(),
            AwsCredentialsType::Oidc
        );
    }

    #[test]
    fn test_provider_configuration_aws_role_delegation() {
        let options = ProviderConfigurationOptions {
            name: "aws-prod".into(),
            provider_name: "aws".into(),
            aws_credentials_type: AwsCredentialsType::RoleDelegation.into(),
            aws_role_arn: "arn:aws:iam::123456789012:role/scalr".into(),
            aws_external_id: TriState::Null,
            account: "acc-1".into(),
            environments: vec!["env-1".to_string(), "env-2".to_string()].into(),
            ..Default::default()
        };

        assert!(options.validate_create().is_ok());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "name": "aws-prod",
                "provider-name": "aws",
                "aws-credentials-type": "role_delegation",
                "aws-role-arn": "arn:aws:iam::123456789012:role/scalr",
                "aws-external-id": null
            })
        );

        let environments = options
            .relationships()
            .into_iter()
            .find(|(name, _)| *name == "environments")
            .and_then(|(_, rel)| rel.into_option())
            .unwrap();
        assert_eq!(environments.ids(), vec!["env-1", "env-2"]);
    }

    #[test]
    fn test_provider_configuration_requires_provider_name() {
        let options = ProviderConfigurationOptions {
            name: "k8s".into(),
            account: "acc-1".into(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate_create(),
            Err(ResourceError::RequiredField {
                field: "provider-name",
                ..
            })
        ));
    }

    #[test]
    fn test_provider_configuration_deserialization() {
        let configuration: ProviderConfiguration = serde_json::from_value(json!({
            "id": "pcfg-1",
            "type": "provider-configurations",
            "attributes": {
                "name": "azure",
                "provider-name": "azurerm",
                "is-shared": false,
                "is-custom": false,
                "azurerm-auth-type": "oidc",
                "azurerm-tenant-id": "tenant"
            },
            "relationships": {
                "environments": {"data": [{"type": "environments", "id": "env-1"}]},
                "parameters": {"links": {"related": "/api/iacp/v3/provider-configurations/pcfg-1/parameters"}}
            }
        }))
        .unwrap();

        assert_eq!(
            configuration.attributes.azurerm_auth_type,
            Some(AzurermAuthType::Oidc)
        );
        assert_eq!(
            configuration.relationships.environments.unwrap().ids(),
            vec!["env-1"]
        );
        let parameters = configuration.relationships.parameters.unwrap();
        assert!(parameters.data.is_none());
        assert!(parameters.links.is_some());
    }
}
