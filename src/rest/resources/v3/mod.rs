//! REST resources for the `/api/iacp/v3` API.
//!
//! Every resource is a [`Resource`](crate::jsonapi::Resource) alias with an
//! [`ApiResource`](crate::rest::ApiResource) implementation, an options
//! struct for create and update, and a list options struct.
//!
//! # Available Resources
//!
//! ## Account structure
//!
//! - [`Environment`] - A group of workspaces with shared defaults
//! - [`Workspace`] - One IaC configuration and its state
//! - [`Variable`] - A Terraform or shell variable at account, environment or
//!   workspace scope
//! - [`Tag`] - A label for environments and workspaces
//!
//! ## Run infrastructure
//!
//! - [`Hook`] - A lifecycle script fetched from VCS
//! - [`AgentPool`] - A pool of self-hosted agents
//! - [`SshKey`] - A key for fetching private modules
//!
//! ## Provider credentials
//!
//! - [`ProviderConfiguration`] - Credentials of one Terraform provider
//! - [`ProviderConfigurationParameter`] - An argument of a custom provider
//!   configuration, nested under its configuration
//!
//! ## Access control
//!
//! - [`Role`] - A named set of permissions
//! - [`Team`] - A group of users

mod agent_pool;
pub mod common;
mod environment;
mod hook;
mod provider_configuration;
mod provider_configuration_parameter;
mod role;
mod ssh_key;
mod tag;
mod team;
mod variable;
mod workspace;

pub use agent_pool::{
    AgentPool, AgentPoolAttributes, AgentPoolListOptions, AgentPoolOptions, AgentPoolRelationships,
};
pub use environment::{
    Environment, EnvironmentAttributes, EnvironmentListOptions, EnvironmentOptions,
    EnvironmentRelationships, EnvironmentStatus,
};
pub use hook::{Hook, HookAttributes, HookListOptions, HookOptions, HookRelationships};
pub use provider_configuration::{
    AwsCredentialsType, AzurermAuthType, GoogleAuthType, ProviderConfiguration,
    ProviderConfigurationAttributes, ProviderConfigurationListOptions,
    ProviderConfigurationOptions, ProviderConfigurationRelationships,
};
pub use provider_configuration_parameter::{
    ProviderConfigurationParameter, ProviderConfigurationParameterAttributes,
    ProviderConfigurationParameterListOptions, ProviderConfigurationParameterOptions,
    ProviderConfigurationParameterRelationships, PROVIDER_CONFIGURATION,
};
pub use role::{Role, RoleAttributes, RoleListOptions, RoleOptions, RoleRelationships};
pub use ssh_key::{SshKey, SshKeyAttributes, SshKeyListOptions, SshKeyOptions, SshKeyRelationships};
pub use tag::{Tag, TagAttributes, TagListOptions, TagOptions, TagRelationships};
pub use team::{Team, TeamAttributes, TeamListOptions, TeamOptions, TeamRelationships};
pub use variable::{
    Variable, VariableAttributes, VariableCategory, VariableListOptions, VariableOptions,
    VariableRelationships,
};
pub use workspace::{
    AutoQueueRuns, ExecutionMode, IacPlatform, Workspace, WorkspaceAttributes,
    WorkspaceEnvironmentType, WorkspaceListOptions, WorkspaceOptions, WorkspaceRelationships,
};
