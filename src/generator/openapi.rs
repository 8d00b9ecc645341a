//! OpenAPI 3 document types.
//!
//! A simplified representation covering what resource extraction needs:
//! paths with their operations and parameters, and component schemas.
//! Documents load from JSON or YAML.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GeneratorError, Result};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// OpenAPI document root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,

    /// Servers
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// API information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,

    /// Server description
    #[serde(default)]
    pub description: Option<String>,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation
    #[serde(default)]
    pub get: Option<Operation>,

    /// POST operation
    #[serde(default)]
    pub post: Option<Operation>,

    /// PUT operation
    #[serde(default)]
    pub put: Option<Operation>,

    /// PATCH operation
    #[serde(default)]
    pub patch: Option<Operation>,

    /// DELETE operation
    #[serde(default)]
    pub delete: Option<Operation>,

    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

/// HTTP operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    /// Summary
    #[serde(default)]
    pub summary: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Parameters
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// Request body
    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,

    /// Tags (for grouping)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the operation is deprecated
    #[serde(default)]
    pub deprecated: bool,
}

/// Parameter definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Required flag
    #[serde(default)]
    pub required: bool,

    /// Schema
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// A parameter or a reference to a component parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    /// Reference to a component parameter
    Reference {
        /// The reference (e.g., `#/components/parameters/PageNumber`)
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    /// Inline parameter
    Parameter(Box<Parameter>),
}

/// Request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,

    /// Required flag
    #[serde(default)]
    pub required: bool,
}

/// Response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Description
    #[serde(default)]
    pub description: String,

    /// Content types
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,
}

/// Schema or reference.
///
/// The reference variant comes first so any object carrying `$ref` is read
/// as a reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    /// Reference to a component schema
    Reference {
        /// The reference (e.g., `#/components/schemas/Workspace`)
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    /// Inline schema
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// Returns the component name of a reference.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            Self::Reference { ref_path } => ref_path.strip_prefix(SCHEMA_REF_PREFIX),
            Self::Schema(_) => None,
        }
    }
}

/// The `type` of a schema: one name, or a list in OpenAPI 3.1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// A single type name
    Single(String),

    /// Several type names (e.g., `["string", "null"]`)
    Multiple(Vec<String>),
}

impl SchemaType {
    /// Returns the first type other than `null`.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        match self {
            Self::Single(name) => Some(name.as_str()),
            Self::Multiple(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }

    /// Returns true if `null` is one of the types.
    #[must_use]
    pub fn allows_null(&self) -> bool {
        match self {
            Self::Single(name) => name == "null",
            Self::Multiple(names) => names.iter().any(|name| name == "null"),
        }
    }
}

/// `additionalProperties`: a flag or a value schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` or `false`
    Allowed(bool),

    /// Schema of every value
    Schema(Box<SchemaOrRef>),
}

/// Schema definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Object properties
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaOrRef>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Array item schema
    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    /// Allowed values
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    /// Map value schema
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// Schemas merged into this one
    #[serde(rename = "allOf", default)]
    pub all_of: Vec<SchemaOrRef>,

    /// Alternatives
    #[serde(rename = "oneOf", default)]
    pub one_of: Vec<SchemaOrRef>,

    /// Alternatives
    #[serde(rename = "anyOf", default)]
    pub any_of: Vec<SchemaOrRef>,

    /// OpenAPI 3.0 nullability flag
    #[serde(default)]
    pub nullable: bool,

    /// Set by the server only
    #[serde(rename = "readOnly", default)]
    pub read_only: bool,

    /// Accepted in requests but never returned
    #[serde(rename = "writeOnly", default)]
    pub write_only: bool,

    /// Deprecated flag
    #[serde(default)]
    pub deprecated: bool,
}

impl Schema {
    /// Returns the primary type name.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(SchemaType::primary)
    }

    /// Returns true if the schema accepts `null`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
            || self
                .schema_type
                .as_ref()
                .is_some_and(SchemaType::allows_null)
    }

    /// Returns the enum values that are strings.
    #[must_use]
    pub fn string_enum(&self) -> Vec<&str> {
        self.enum_values
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect()
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Schema definitions
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaOrRef>,

    /// Parameter definitions
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterOrRef>,
}

impl OpenApiSpec {
    /// Loads a document from a file.
    ///
    /// `.json` files are parsed as JSON and `.yaml`/`.yml` files as YAML;
    /// anything else is sniffed from its content.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if the file cannot be read, and a
    /// parse error if it is not an OpenAPI 3 document.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        let spec: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            _ => return Self::parse(&content),
        };
        spec.check_version()?;
        Ok(spec)
    }

    /// Parses a document from a JSON or YAML string.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the content is not an OpenAPI 3 document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scalr_api::generator::OpenApiSpec;
    ///
    /// let spec = OpenApiSpec::parse(
    ///     "openapi: 3.0.3\ninfo:\n  title: Scalr\n  version: '3'\npaths: {}\n",
    /// )
    /// .unwrap();
    /// assert_eq!(spec.info.title, "Scalr");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let spec: Self = if content.trim_start().starts_with('{') {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        spec.check_version()?;
        Ok(spec)
    }

    fn check_version(&self) -> Result<()> {
        if self.openapi.starts_with("3.") {
            Ok(())
        } else {
            Err(GeneratorError::Parse(format!(
                "unsupported OpenAPI version {}, expected 3.x",
                self.openapi
            )))
        }
    }

    /// Resolves a `#/components/schemas/...` reference.
    ///
    /// References to references are followed.
    #[must_use]
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
        let schema = self.components.as_ref()?.schemas.get(name)?;
        self.resolve(schema)
    }

    /// Returns the schema behind a schema or reference.
    #[must_use]
    pub fn resolve<'a>(&'a self, schema: &'a SchemaOrRef) -> Option<&'a Schema> {
        let mut current = schema;
        // Bounded so reference cycles cannot loop forever.
        for _ in 0..16 {
            match current {
                SchemaOrRef::Schema(schema) => return Some(schema),
                SchemaOrRef::Reference { ref_path } => {
                    let name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
                    current = self.components.as_ref()?.schemas.get(name)?;
                }
            }
        }
        None
    }

    /// Returns the parameter behind a parameter or reference.
    #[must_use]
    pub fn resolve_parameter<'a>(&'a self, parameter: &'a ParameterOrRef) -> Option<&'a Parameter> {
        let mut current = parameter;
        for _ in 0..16 {
            match current {
                ParameterOrRef::Parameter(parameter) => return Some(parameter),
                ParameterOrRef::Reference { ref_path } => {
                    let name = ref_path.strip_prefix(PARAMETER_REF_PREFIX)?;
                    current = self.components.as_ref()?.parameters.get(name)?;
                }
            }
        }
        None
    }

    /// Returns the path component of the first server URL.
    ///
    /// `https://{host}/api/iacp/v3` yields `/api/iacp/v3`.
    #[must_use]
    pub fn server_base_path(&self) -> Option<String> {
        let url = &self.servers.first()?.url;
        let without_scheme = url.split_once("://").map_or(url.as_str(), |(_, rest)| rest);
        let path = without_scheme
            .find('/')
            .map_or("", |index| &without_scheme[index..]);
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
openapi: 3.0.3
info:
  title: Scalr API
  version: '3.0'
servers:
  - url: https://{host}/api/iacp/v3
paths:
  /tags:
    get:
      operationId: list_tags
      parameters:
        - $ref: '#/components/parameters/PageNumber'
        - name: filter[name]
          in: query
          schema:
            type: string
components:
  parameters:
    PageNumber:
      name: page[number]
      in: query
      schema:
        type: integer
  schemas:
    Tag:
      type: object
      properties:
        type:
          type: string
          enum: [tags]
        attributes:
          $ref: '#/components/schemas/TagAttributes'
    TagAttributes:
      type: object
      required: [name]
      properties:
        name:
          type: [string, 'null']
";

    #[test]
    fn test_parse_yaml_document() {
        let spec = OpenApiSpec::parse(YAML).unwrap();
        assert_eq!(spec.info.version, "3.0");
        assert_eq!(spec.server_base_path().as_deref(), Some("/api/iacp/v3"));

        let operation = spec.paths["/tags"].get.as_ref().unwrap();
        assert_eq!(operation.operation_id.as_deref(), Some("list_tags"));

        let names: Vec<&str> = operation
            .parameters
            .iter()
            .filter_map(|parameter| spec.resolve_parameter(parameter))
            .map(|parameter| parameter.name.as_str())
            .collect();
        assert_eq!(names, vec!["page[number]", "filter[name]"]);
    }

    #[test]
    fn test_reference_resolution() {
        let spec = OpenApiSpec::parse(YAML).unwrap();
        let tag = spec.resolve_schema_ref("#/components/schemas/Tag").unwrap();
        let attributes = spec.resolve(&tag.properties["attributes"]).unwrap();
        assert_eq!(attributes.required, vec!["name".to_string()]);

        let name = spec.resolve(&attributes.properties["name"]).unwrap();
        assert_eq!(name.type_name(), Some("string"));
        assert!(name.is_nullable());

        assert!(spec.resolve_schema_ref("#/components/schemas/Missing").is_none());
        assert!(spec.resolve_schema_ref("#/definitions/Tag").is_none());
    }

    #[test]
    fn test_parse_json_document() {
        let spec = OpenApiSpec::parse(
            r#"{"openapi": "3.1.0", "info": {"title": "t", "version": "1"}, "paths": {}}"#,
        )
        .unwrap();
        assert!(spec.paths.is_empty());
        assert!(spec.server_base_path().is_none());
    }

    #[test]
    fn test_rejects_swagger_2() {
        let result = OpenApiSpec::parse("openapi: '2.0'\ninfo:\n  title: t\n  version: '1'\n");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_reference_cycle_does_not_loop() {
        let spec = OpenApiSpec::parse(
            r"
openapi: 3.0.0
info: {title: t, version: '1'}
components:
  schemas:
    A: {$ref: '#/components/schemas/B'}
    B: {$ref: '#/components/schemas/A'}
",
        )
        .unwrap();
        assert!(spec.resolve_schema_ref("#/components/schemas/A").is_none());
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yml");
        std::fs::write(&path, YAML).unwrap();

        let spec = OpenApiSpec::from_file(&path).unwrap();
        assert_eq!(spec.info.title, "Scalr API");

        let missing = OpenApiSpec::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(GeneratorError::Io(_))));
    }
}
