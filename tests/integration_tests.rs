//! Integration tests for the Scalr API SDK.
//!
//! These tests verify end-to-end functionality of the configuration system
//! and the types re-exported at the crate root.

use std::collections::HashMap;
use std::time::Duration;

use scalr_api::rest::resources::{VariableCategory, VariableOptions};
use scalr_api::rest::ResourceOptions;
use scalr_api::{
    Address, ApiToken, ConfigError, HttpClient, RestClient, RetryPolicy, ScalrConfig, TriState,
};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    let policy = RetryPolicy::new(Duration::from_millis(50), Duration::from_secs(2), 5).unwrap();

    let config = ScalrConfig::builder()
        .address(Address::new("https://acme.scalr.io/").unwrap())
        .token(ApiToken::new("test-token").unwrap())
        .base_path("api/iacp/v3/")
        .user_agent_prefix("TestApp/1.0")
        .retry_policy(policy)
        .timeout(Duration::from_secs(30))
        .header("Prefer", "profile=preview")
        .build()
        .unwrap();

    assert_eq!(config.address().as_ref(), "https://acme.scalr.io");
    assert_eq!(config.token().as_ref(), "test-token");
    assert_eq!(config.base_path(), "/api/iacp/v3");
    assert_eq!(config.user_agent_prefix(), Some("TestApp/1.0"));
    assert_eq!(config.retry_policy().max_retries(), 5);
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(
        config.headers().get("Prefer").map(String::as_str),
        Some("profile=preview")
    );
}

#[test]
fn test_defaults_applied_when_only_token_set() {
    let config = ScalrConfig::builder()
        .token(ApiToken::new("test-token").unwrap())
        .build()
        .unwrap();

    assert_eq!(config.address().as_ref(), "https://scalr.io");
    assert_eq!(config.base_path(), "/api/iacp/v3");
    assert_eq!(config.retry_policy(), &RetryPolicy::default());
    assert_eq!(config.timeout(), None);
}

#[test]
fn test_missing_token_is_an_error() {
    let result = ScalrConfig::builder().build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "token" })
    ));
}

#[test]
fn test_environment_lookup_prefers_address_over_hostname() {
    let config = ScalrConfig::builder()
        .with_env_lookup(env(&[
            ("SCALR_ADDRESS", "https://one.scalr.io"),
            ("SCALR_HOSTNAME", "two.scalr.io"),
            ("SCALR_TOKEN", "env-token"),
        ]))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.address().as_ref(), "https://one.scalr.io");
    assert_eq!(config.token().as_ref(), "env-token");
}

#[test]
fn test_environment_lookup_uses_hostname() {
    let config = ScalrConfig::builder()
        .with_env_lookup(env(&[
            ("SCALR_HOSTNAME", "acme.scalr.io"),
            ("SCALR_TOKEN", "env-token"),
        ]))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.address().host_name(), "acme.scalr.io");
    assert_eq!(config.address().scheme(), "https");
}

#[test]
fn test_explicit_values_win_over_environment() {
    let config = ScalrConfig::builder()
        .token(ApiToken::new("explicit").unwrap())
        .with_env_lookup(env(&[("SCALR_TOKEN", "env-token")]))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.token().as_ref(), "explicit");
}

#[test]
fn test_invalid_environment_value_names_the_variable() {
    let result = ScalrConfig::builder().with_env_lookup(env(&[
        ("SCALR_ADDRESS", "ftp://acme.scalr.io"),
        ("SCALR_TOKEN", "env-token"),
    ]));

    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvironment {
            name: "SCALR_ADDRESS",
            ..
        })
    ));
}

#[test]
fn test_token_is_redacted_in_debug_output() {
    let config = ScalrConfig::builder()
        .token(ApiToken::new("super-secret").unwrap())
        .build()
        .unwrap();

    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret"));
}

#[test]
fn test_multi_tenant_scenario_multiple_independent_clients() {
    let config_a = ScalrConfig::builder()
        .address(Address::new("https://a.scalr.io").unwrap())
        .token(ApiToken::new("token-a").unwrap())
        .build()
        .unwrap();
    let config_b = ScalrConfig::builder()
        .address(Address::new("https://b.scalr.io").unwrap())
        .token(ApiToken::new("token-b").unwrap())
        .build()
        .unwrap();

    let client_a = HttpClient::new(&config_a).unwrap();
    let client_b = HttpClient::new(&config_b).unwrap();

    assert_eq!(client_a.base_uri(), "https://a.scalr.io");
    assert_eq!(client_b.base_uri(), "https://b.scalr.io");
    assert_eq!(
        client_a.default_headers().get("Authorization"),
        Some(&"Bearer token-a".to_string())
    );
    assert_eq!(
        client_b.default_headers().get("Authorization"),
        Some(&"Bearer token-b".to_string())
    );
}

#[test]
fn test_partial_update_options_serialize_only_set_fields() {
    let options = VariableOptions {
        value: "eu-west-1".into(),
        category: VariableCategory::Terraform.into(),
        description: TriState::Null,
        ..Default::default()
    };

    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "value": "eu-west-1",
            "category": "terraform",
            "description": null
        })
    );
    assert!(options
        .relationships()
        .iter()
        .all(|(_, relationship)| relationship.is_unset()));
}

#[test]
fn test_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<ScalrConfig>();
    assert_send_sync::<HttpClient>();
    assert_send_sync::<RestClient>();
    assert_send_sync::<TriState<String>>();
}
