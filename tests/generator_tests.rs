//! Integration tests for the OpenAPI code generator.
//!
//! These tests load documents from disk, render them and check the
//! shape of the generated modules.

use std::fs;

use scalr_api::generator::{Generator, GeneratorError, GeneratorOptions, OpenApiSpec};
use serde_json::json;
use tempfile::TempDir;

/// A small Scalr-like document with one top-level resource.
fn environment_spec() -> serde_json::Value {
    let document = json!({
        "type": "object",
        "properties": {"data": {"$ref": "#/components/schemas/Environment"}}
    });
    let listing = json!({
        "type": "object",
        "properties": {
            "data": {"type": "array", "items": {"$ref": "#/components/schemas/Environment"}}
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {"title": "Scalr", "version": "3"},
        "servers": [{"url": "https://example.scalr.io/api/iacp/v3"}],
        "paths": {
            "/environments": {
                "get": {
                    "parameters": [
                        {"name": "filter[name]", "in": "query", "schema": {"type": "string"}},
                        {"name": "page[size]", "in": "query", "schema": {"type": "integer"}}
                    ],
                    "responses": {"200": {
                        "description": "ok",
                        "content": {"application/vnd.api+json": {"schema": listing}}
                    }}
                },
                "post": {
                    "responses": {"201": {
                        "description": "created",
                        "content": {"application/vnd.api+json": {"schema": document}}
                    }}
                }
            },
            "/environments/{environment}": {
                "get": {
                    "responses": {"200": {
                        "description": "ok",
                        "content": {"application/vnd.api+json": {"schema": document}}
                    }}
                },
                "patch": {"responses": {"200": {"description": "ok"}}},
                "delete": {"responses": {"204": {"description": "deleted"}}}
            }
        },
        "components": {"schemas": {
            "Environment": {
                "description": "An environment.",
                "type": "object",
                "properties": {
                    "id": {"type": "string", "readOnly": true},
                    "type": {"type": "string", "enum": ["environments"]},
                    "attributes": {
                        "type": "object",
                        "required": ["name"],
                        "properties": {
                            "name": {"type": "string", "description": "Environment name."},
                            "status": {"type": "string", "enum": ["active", "inactive"]},
                            "cost-estimation-enabled": {"type": "boolean"}
                        }
                    },
                    "relationships": {
                        "type": "object",
                        "required": ["account"],
                        "properties": {
                            "account": {
                                "type": "object",
                                "properties": {"data": {
                                    "type": "object",
                                    "properties": {
                                        "type": {"type": "string", "enum": ["accounts"]},
                                        "id": {"type": "string"}
                                    }
                                }}
                            }
                        }
                    }
                }
            }
        }}
    })
}

fn write_spec(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_loads_json_and_yaml_documents() {
    let dir = TempDir::new().unwrap();
    let spec = environment_spec();

    let json_path = write_spec(&dir, "openapi.json", &spec.to_string());
    let yaml_path = write_spec(&dir, "openapi.yml", &serde_yaml::to_string(&spec).unwrap());

    let from_json = OpenApiSpec::from_file(&json_path).unwrap();
    let from_yaml = OpenApiSpec::from_file(&yaml_path).unwrap();

    assert_eq!(from_json.info.title, "Scalr");
    assert_eq!(from_json.paths.len(), 2);
    assert_eq!(from_yaml.paths.len(), from_json.paths.len());
}

#[test]
fn test_rejects_unsupported_version() {
    let dir = TempDir::new().unwrap();
    let path = write_spec(
        &dir,
        "old.yaml",
        "openapi: 2.0.0\ninfo: {title: Legacy, version: '1'}\npaths: {}\n",
    );

    let error = OpenApiSpec::from_file(&path).unwrap_err();
    assert!(matches!(error, GeneratorError::Parse(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let error = OpenApiSpec::from_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(error, GeneratorError::Io(_)));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_resource_module() {
    let spec: OpenApiSpec = serde_json::from_value(environment_spec()).unwrap();
    let generator = Generator::new(GeneratorOptions::default()).unwrap();

    let files = generator.render(&spec).unwrap();
    let names: Vec<String> = files.iter().map(|f| f.path.display().to_string()).collect();
    assert_eq!(names, vec!["scalr/environment.rs", "scalr/mod.rs"]);

    let source = &files[0].contents;
    assert!(source.contains("Generated from the `Environment` schema of Scalr 3."));
    assert!(source.contains("use scalr_api::jsonapi::{PageOptions, Relationship, Resource};"));
    assert!(source.contains(
        "pub type Environment = Resource<EnvironmentAttributes, EnvironmentRelationships>;"
    ));
    assert!(source.contains("const TYPE: &'static str = \"environments\";"));
    assert!(source.contains("\"environments/{id}\""));
    assert!(source.contains("ResourceOperation::List"));
    assert!(source.contains("HttpMethod::Patch"));
    assert!(source.contains("pub enum EnvironmentStatus"));
    assert!(source.contains("#[serde(rename = \"inactive\")]"));
    assert!(source.contains("    #[serde(other)]\n    Unknown,\n}"));
    assert!(source.contains("/// Environment name."));
    assert!(source.contains("pub cost_estimation_enabled: TriState<bool>,"));
    assert!(source.contains("to_one(\"accounts\", &self.account)"));
    assert!(source.contains("require_non_blank(Environment::NAME, \"name\", &self.name)?;"));
    assert!(source.contains("#[serde(rename = \"filter[name]\", skip_serializing_if = \"Option::is_none\")]"));
    assert!(!source.contains("page[size]\""));

    let module = &files[1].contents;
    assert!(module.contains("pub mod environment;"));
    assert!(module.contains("EnvironmentStatus,"));
    assert!(!module.contains("pub mod types;"));
}

#[test]
fn test_render_inside_the_sdk_crate() {
    let spec: OpenApiSpec = serde_json::from_value(environment_spec()).unwrap();
    let generator = Generator::new(GeneratorOptions {
        module_name: "v3".to_string(),
        crate_path: "crate".to_string(),
        only: Vec::new(),
    })
    .unwrap();

    let files = generator.render(&spec).unwrap();

    assert!(files[0].path.starts_with("v3"));
    assert!(files[0].contents.contains("use crate::{HttpMethod, TriState};"));
    assert!(!files[0].contents.contains("scalr_api"));
}

#[test]
fn test_unknown_only_entry_is_rejected() {
    let spec: OpenApiSpec = serde_json::from_value(environment_spec()).unwrap();
    let generator = Generator::new(GeneratorOptions {
        only: vec!["workspaces".to_string()],
        ..Default::default()
    })
    .unwrap();

    let error = generator.render(&spec).unwrap_err();
    assert!(matches!(error, GeneratorError::Parse(_)));
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_generate_writes_files() {
    let dir = TempDir::new().unwrap();
    let spec: OpenApiSpec = serde_json::from_value(environment_spec()).unwrap();
    let generator = Generator::new(GeneratorOptions::default()).unwrap();

    let written = generator.generate(&spec, dir.path()).unwrap();

    assert_eq!(written.len(), 2);
    let module = fs::read_to_string(dir.path().join("scalr/mod.rs")).unwrap();
    assert!(module.starts_with("//! Resources of Scalr 3."));
    assert!(dir.path().join("scalr/environment.rs").is_file());
}

#[test]
fn test_generate_is_deterministic() {
    let spec: OpenApiSpec = serde_json::from_value(environment_spec()).unwrap();
    let generator = Generator::new(GeneratorOptions::default()).unwrap();

    let first = generator.render(&spec).unwrap();
    let second = generator.render(&spec).unwrap();
    assert_eq!(first, second);
}
