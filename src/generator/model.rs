//! Resource model extracted from an OpenAPI document.
//!
//! A JSON:API resource schema is a component schema whose `type` property
//! is a single-valued string enum and which carries `attributes`. Paths are
//! assigned to a resource by the resource their responses return, or by
//! their collection segment.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use super::error::{GeneratorError, Result};
use super::naming::{dedupe, field_name, sanitize_module_name, to_snake_case, type_name};
use super::openapi::{
    AdditionalProperties, OpenApiSpec, Operation, Parameter, PathItem, Schema, SchemaOrRef,
    SchemaType,
};

const VALUE: &str = "serde_json::Value";
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Everything the templates render.
#[derive(Debug, Clone, Serialize)]
pub struct ApiModel {
    /// API title from `info`.
    pub title: String,
    /// API version from `info`.
    pub version: String,
    /// Resources, sorted by module name.
    pub resources: Vec<ResourceModel>,
    /// Referenced component objects.
    pub types: Vec<StructModel>,
    /// Referenced component enums and enums nested in component objects.
    pub enums: Vec<EnumModel>,
    pub types_use_datetime: bool,
    pub types_use_hashmap: bool,
}

/// One JSON:API resource.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceModel {
    /// Type name (e.g., `Workspace`).
    pub name: String,
    /// Module name (e.g., `workspace`).
    pub module: String,
    /// The component schema it was read from.
    pub schema_name: String,
    /// JSON:API type (e.g., `workspaces`).
    pub resource_type: String,
    pub description: Option<String>,
    pub attributes: Vec<FieldModel>,
    pub relationships: Vec<RelationshipModel>,
    /// Enums declared inline in the attributes.
    pub enums: Vec<EnumModel>,
    pub paths: Vec<PathModel>,
    /// Query parameters of the list operation, paging excluded.
    pub list_parameters: Vec<QueryParamModel>,
    /// Whether the list operation takes `include`.
    pub has_include: bool,
    pub uses_datetime: bool,
    pub uses_hashmap: bool,
    pub uses_to_one: bool,
    pub uses_to_many: bool,
    pub uses_require: bool,
    pub uses_require_non_blank: bool,
}

/// A struct field read from an object property.
#[derive(Debug, Clone, Serialize)]
pub struct FieldModel {
    /// Member name in JSON.
    pub json_name: String,
    /// Rust field name, escaped.
    pub field: String,
    /// Rust type without the `Option`/`TriState` wrapper.
    pub rust_type: String,
    pub description: Option<String>,
    pub required: bool,
    pub nullable: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub deprecated: bool,
    /// Whether a required check may reject blank strings.
    pub is_string: bool,
}

/// A relationship of a resource.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipModel {
    pub json_name: String,
    pub field: String,
    /// Id field name in the options struct, clear of attribute fields.
    pub option_field: String,
    /// JSON:API type of the related resources.
    pub target_type: String,
    /// To-many when true.
    pub many: bool,
    pub required: bool,
    pub read_only: bool,
    pub description: Option<String>,
}

/// A string enum.
#[derive(Debug, Clone, Serialize)]
pub struct EnumModel {
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<VariantModel>,
}

/// One enum value.
#[derive(Debug, Clone, Serialize)]
pub struct VariantModel {
    pub name: String,
    pub value: String,
}

/// A component object referenced by a resource.
#[derive(Debug, Clone, Serialize)]
pub struct StructModel {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldModel>,
}

/// A path of a resource operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathModel {
    /// `HttpMethod` variant (e.g., `Get`).
    pub method: String,
    /// `ResourceOperation` variant (e.g., `Read`).
    pub operation: String,
    /// Placeholder names in order.
    pub ids: Vec<String>,
    /// Template relative to the API base path.
    pub template: String,
}

/// A list query parameter.
#[derive(Debug, Clone, Serialize)]
pub struct QueryParamModel {
    /// Query key (e.g., `filter[name]`).
    pub key: String,
    pub field: String,
    pub rust_type: String,
    pub description: Option<String>,
}

/// Builds the model of every resource, or of the resources named in `only`.
///
/// `only` entries match a JSON:API type, a schema name or a module name,
/// ignoring case.
///
/// # Errors
///
/// Returns [`GeneratorError::Parse`] if the document declares no resources
/// or an `only` entry matches none.
pub fn build_model(spec: &OpenApiSpec, only: &[String]) -> Result<ApiModel> {
    let candidates = find_resources(spec);
    if candidates.is_empty() {
        return Err(GeneratorError::Parse(
            "no JSON:API resource schemas found in components".to_string(),
        ));
    }

    let selected = select(&candidates, only)?;
    let resource_schemas: BTreeSet<&str> = candidates.iter().map(|c| c.schema_name).collect();
    let known_types: BTreeSet<&str> = candidates
        .iter()
        .map(|c| c.resource_type.as_str())
        .collect();
    let mut routes = collect_routes(spec, &known_types);

    let mut mapper = TypeMapper {
        spec,
        resource_schemas,
        components: BTreeSet::new(),
    };

    let mut resources = Vec::new();
    for candidate in selected {
        let route = routes.remove(&candidate.resource_type).unwrap_or_default();
        if route.paths.is_empty() {
            warn!(resource = %candidate.resource_type, "resource has no operations");
        }
        resources.push(mapper.resource(candidate, route));
    }

    let mut modules: Vec<String> = resources.iter().map(|r| r.module.clone()).collect();
    dedupe(&mut modules);
    for (resource, module) in resources.iter_mut().zip(modules) {
        resource.module = module;
    }
    resources.sort_by(|a, b| a.module.cmp(&b.module));

    let (types, enums) = mapper.component_types();
    let type_uses = |needle: &str| {
        types
            .iter()
            .flat_map(|t| &t.fields)
            .any(|f| f.rust_type.contains(needle))
    };

    Ok(ApiModel {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        types_use_datetime: type_uses("DateTime<"),
        types_use_hashmap: type_uses("HashMap<"),
        resources,
        types,
        enums,
    })
}

struct Candidate<'a> {
    schema_name: &'a str,
    resource_type: String,
    schema: &'a Schema,
}

/// Finds resource schemas, keeping the shortest schema name per type.
fn find_resources(spec: &OpenApiSpec) -> Vec<Candidate<'_>> {
    let Some(components) = &spec.components else {
        return Vec::new();
    };

    let mut by_type: BTreeMap<String, Candidate<'_>> = BTreeMap::new();
    for (name, schema) in &components.schemas {
        let Some(schema) = spec.resolve(schema) else {
            continue;
        };
        let Some(resource_type) = resource_type_of(spec, schema) else {
            continue;
        };

        let replace = by_type
            .get(&resource_type)
            .map_or(true, |existing| name.len() < existing.schema_name.len());
        if replace {
            by_type.insert(
                resource_type.clone(),
                Candidate {
                    schema_name: name,
                    resource_type,
                    schema,
                },
            );
        }
    }

    by_type.into_values().collect()
}

fn select<'c, 'a>(candidates: &'c [Candidate<'a>], only: &[String]) -> Result<Vec<&'c Candidate<'a>>> {
    if only.is_empty() {
        return Ok(candidates.iter().collect());
    }

    let matches = |candidate: &Candidate<'_>, wanted: &str| {
        let wanted = wanted.to_ascii_lowercase();
        candidate.resource_type.to_ascii_lowercase() == wanted
            || candidate.schema_name.to_ascii_lowercase() == wanted
            || to_snake_case(candidate.schema_name) == to_snake_case(&wanted)
    };

    let unknown: Vec<&str> = only
        .iter()
        .filter(|wanted| !candidates.iter().any(|c| matches(c, wanted)))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(GeneratorError::Parse(format!(
            "unknown resource(s): {}",
            unknown.join(", ")
        )));
    }

    Ok(candidates
        .iter()
        .filter(|c| only.iter().any(|wanted| matches(c, wanted)))
        .collect())
}

/// Properties and required names of an object, `allOf` members merged.
#[derive(Default)]
struct ObjectView<'a> {
    properties: BTreeMap<&'a str, &'a SchemaOrRef>,
    required: BTreeSet<&'a str>,
}

fn object_view<'a>(spec: &'a OpenApiSpec, schema: &'a Schema) -> ObjectView<'a> {
    let mut view = ObjectView::default();
    merge_object(spec, schema, &mut view, 0);
    view
}

fn merge_object<'a>(spec: &'a OpenApiSpec, schema: &'a Schema, view: &mut ObjectView<'a>, depth: usize) {
    if depth > 8 {
        return;
    }
    for member in &schema.all_of {
        if let Some(member) = spec.resolve(member) {
            merge_object(spec, member, view, depth + 1);
        }
    }
    for (name, property) in &schema.properties {
        view.properties.insert(name.as_str(), property);
    }
    view.required
        .extend(schema.required.iter().map(String::as_str));
}

fn is_null_schema(spec: &OpenApiSpec, schema: &SchemaOrRef) -> bool {
    spec.resolve(schema)
        .is_some_and(|s| matches!(&s.schema_type, Some(SchemaType::Single(t)) if t == "null"))
}

/// Returns the only non-null member of a `oneOf`/`anyOf`, or the schema.
fn unwrap_nullable<'a>(spec: &'a OpenApiSpec, schema: &'a Schema) -> &'a Schema {
    let members: Vec<&SchemaOrRef> = schema
        .one_of
        .iter()
        .chain(&schema.any_of)
        .filter(|member| !is_null_schema(spec, member))
        .collect();
    match members.as_slice() {
        [single] => spec.resolve(*single).unwrap_or(schema),
        _ => schema,
    }
}

fn single_enum_value(spec: &OpenApiSpec, schema: &SchemaOrRef) -> Option<String> {
    let schema = spec.resolve(schema)?;
    match schema.string_enum().as_slice() {
        [value] => Some((*value).to_string()),
        _ => None,
    }
}

fn resource_type_of(spec: &OpenApiSpec, schema: &Schema) -> Option<String> {
    let view = object_view(spec, schema);
    if !view.properties.contains_key("attributes") {
        return None;
    }
    single_enum_value(spec, view.properties.get("type")?)
}

fn identifier_type(spec: &OpenApiSpec, schema: &Schema) -> Option<String> {
    let view = object_view(spec, unwrap_nullable(spec, schema));
    single_enum_value(spec, view.properties.get("type")?)
}

const UNKNOWN_VARIANT: &str = "Unknown";

fn enum_model(name: &str, schema: &Schema) -> EnumModel {
    let values = schema.string_enum();
    // `Unknown` is the catch-all variant emitted by the templates.
    let mut names: Vec<String> = std::iter::once(UNKNOWN_VARIANT.to_string())
        .chain(values.iter().map(|value| type_name(value)))
        .collect();
    dedupe(&mut names);

    EnumModel {
        name: name.to_string(),
        description: schema.description.clone(),
        variants: names
            .into_iter()
            .skip(1)
            .zip(values)
            .map(|(name, value)| VariantModel {
                name,
                value: value.to_string(),
            })
            .collect(),
    }
}

fn push_enum(enums: &mut Vec<EnumModel>, model: EnumModel) {
    if !enums.iter().any(|existing| existing.name == model.name) {
        enums.push(model);
    }
}

/// Maps schemas to Rust types, remembering referenced components.
struct TypeMapper<'a> {
    spec: &'a OpenApiSpec,
    resource_schemas: BTreeSet<&'a str>,
    components: BTreeSet<String>,
}

impl<'a> TypeMapper<'a> {
    fn map(&mut self, schema: &'a SchemaOrRef, owner: &str, field: &str, enums: &mut Vec<EnumModel>) -> String {
        let ref_path = match schema {
            SchemaOrRef::Schema(inline) => return self.map_schema(inline, owner, field, enums),
            SchemaOrRef::Reference { ref_path } => ref_path,
        };

        let Some(name) = schema.ref_name() else {
            warn!(reference = %ref_path, "unsupported reference");
            return VALUE.to_string();
        };
        if self.resource_schemas.contains(name) {
            return VALUE.to_string();
        }

        match self.spec.resolve(schema) {
            Some(target)
                if !target.string_enum().is_empty()
                    || !target.properties.is_empty()
                    || !target.all_of.is_empty() =>
            {
                self.components.insert(name.to_string());
                type_name(name)
            }
            Some(target) => self.map_schema(target, owner, field, enums),
            None => {
                warn!(reference = %ref_path, "unresolved schema reference");
                VALUE.to_string()
            }
        }
    }

    fn map_schema(&mut self, schema: &'a Schema, owner: &str, field: &str, enums: &mut Vec<EnumModel>) -> String {
        if let [single] = schema.all_of.as_slice() {
            return self.map(single, owner, field, enums);
        }
        if !schema.all_of.is_empty() {
            return VALUE.to_string();
        }

        if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
            let spec = self.spec;
            let members: Vec<&'a SchemaOrRef> = schema
                .one_of
                .iter()
                .chain(&schema.any_of)
                .filter(|member| !is_null_schema(spec, member))
                .collect();
            return match members.as_slice() {
                [single] => self.map(*single, owner, field, enums),
                _ => VALUE.to_string(),
            };
        }

        let has_enum = !schema.string_enum().is_empty();
        match schema.type_name() {
            Some("string") | None if has_enum => {
                let name = format!("{owner}{}", type_name(field));
                push_enum(enums, enum_model(&name, schema));
                name
            }
            Some("string") => match schema.format.as_deref() {
                Some("date-time") => "DateTime<Utc>".to_string(),
                _ => "String".to_string(),
            },
            Some("integer") => match schema.format.as_deref() {
                Some("int32") => "i32".to_string(),
                _ => "i64".to_string(),
            },
            Some("number") => "f64".to_string(),
            Some("boolean") => "bool".to_string(),
            Some("array") => {
                let inner = schema.items.as_deref().map_or_else(
                    || VALUE.to_string(),
                    |items| self.map(items, owner, field, enums),
                );
                format!("Vec<{inner}>")
            }
            Some("object") => match &schema.additional_properties {
                Some(AdditionalProperties::Schema(values)) => {
                    format!("HashMap<String, {}>", self.map(values, owner, field, enums))
                }
                _ => VALUE.to_string(),
            },
            _ => VALUE.to_string(),
        }
    }

    fn fields(&mut self, schema: &'a Schema, owner: &str, enums: &mut Vec<EnumModel>) -> Vec<FieldModel> {
        let spec = self.spec;
        let view = object_view(spec, schema);

        let mut fields: Vec<FieldModel> = view
            .properties
            .iter()
            .map(|(&json_name, &property)| {
                let resolved = spec.resolve(property);
                let mut rust_type = self.map(property, owner, json_name, enums);
                if rust_type == owner {
                    rust_type = format!("Box<{owner}>");
                }
                FieldModel {
                    json_name: json_name.to_string(),
                    field: field_name(json_name),
                    is_string: rust_type == "String",
                    rust_type,
                    description: resolved.and_then(|s| s.description.clone()),
                    required: view.required.contains(json_name),
                    nullable: resolved.is_some_and(Schema::is_nullable),
                    read_only: resolved.is_some_and(|s| s.read_only),
                    write_only: resolved.is_some_and(|s| s.write_only),
                    deprecated: resolved.is_some_and(|s| s.deprecated),
                }
            })
            .collect();

        let mut names: Vec<String> = fields.iter().map(|f| f.field.clone()).collect();
        dedupe(&mut names);
        for (field, name) in fields.iter_mut().zip(names) {
            field.field = name;
        }
        fields
    }

    fn relationships(&self, schema: &'a Schema) -> Vec<RelationshipModel> {
        let spec = self.spec;
        let view = object_view(spec, schema);

        let mut relationships: Vec<RelationshipModel> = view
            .properties
            .iter()
            .map(|(&json_name, &property)| {
                let resolved = spec.resolve(property);
                let data = resolved
                    .map(|s| object_view(spec, s))
                    .and_then(|v| v.properties.get("data").copied())
                    .and_then(|data| spec.resolve(data))
                    .map(|data| unwrap_nullable(spec, data));

                let items = data
                    .and_then(|data| data.items.as_deref())
                    .and_then(|items| spec.resolve(items));
                let many = items.is_some() || data.and_then(Schema::type_name) == Some("array");

                let target = (if many { items } else { data })
                    .and_then(|s| identifier_type(spec, s))
                    .unwrap_or_else(|| fallback_type(json_name, many));

                RelationshipModel {
                    json_name: json_name.to_string(),
                    field: field_name(json_name),
                    option_field: field_name(json_name),
                    target_type: target,
                    many,
                    required: view.required.contains(json_name),
                    read_only: resolved.is_some_and(|s| s.read_only),
                    description: resolved.and_then(|s| s.description.clone()),
                }
            })
            .collect();

        let mut names: Vec<String> = relationships.iter().map(|r| r.field.clone()).collect();
        dedupe(&mut names);
        for (relationship, name) in relationships.iter_mut().zip(names) {
            relationship.field = name;
        }
        relationships
    }

    fn resource(&mut self, candidate: &Candidate<'a>, route: Route<'a>) -> ResourceModel {
        let spec = self.spec;
        let name = type_name(candidate.schema_name);
        let view = object_view(spec, candidate.schema);
        let mut enums = Vec::new();

        let attributes = view
            .properties
            .get("attributes")
            .copied()
            .and_then(|attributes| spec.resolve(attributes))
            .map(|attributes| self.fields(attributes, &name, &mut enums))
            .unwrap_or_default();
        let mut relationships = view
            .properties
            .get("relationships")
            .copied()
            .and_then(|relationships| spec.resolve(relationships))
            .map(|relationships| self.relationships(relationships))
            .unwrap_or_default();
        for relationship in &mut relationships {
            if attributes.iter().any(|a| a.field == relationship.option_field) {
                relationship.option_field =
                    field_name(&format!("{}-id", relationship.json_name));
            }
        }

        let list_parameters = query_parameters(spec, &route.list_parameters);
        let has_include = route.list_parameters.iter().any(|p| p.name == "include");

        let writable = |f: &&FieldModel| !f.read_only;
        let required_attributes: Vec<&FieldModel> = attributes
            .iter()
            .filter(writable)
            .filter(|f| f.required)
            .collect();
        let required_relationships: Vec<&RelationshipModel> = relationships
            .iter()
            .filter(|r| r.required && !r.read_only)
            .collect();

        let types = attributes
            .iter()
            .map(|f| f.rust_type.as_str())
            .chain(list_parameters.iter().map(|p| p.rust_type.as_str()));
        let (uses_datetime, uses_hashmap) = types.fold((false, false), |(dt, hm), t| {
            (dt || t.contains("DateTime<"), hm || t.contains("HashMap<"))
        });

        let module = sanitize_module_name(candidate.schema_name)
            .map_or_else(|| "resource".to_string(), |m| if m == "types" { "types_".to_string() } else { m });

        debug!(
            resource = %candidate.resource_type,
            attributes = attributes.len(),
            relationships = relationships.len(),
            paths = route.paths.len(),
            "extracted resource"
        );

        ResourceModel {
            uses_to_one: relationships.iter().any(|r| !r.read_only && !r.many),
            uses_to_many: relationships.iter().any(|r| !r.read_only && r.many),
            uses_require: required_attributes.iter().any(|f| !f.is_string)
                || required_relationships.iter().any(|r| r.many),
            uses_require_non_blank: required_attributes.iter().any(|f| f.is_string)
                || required_relationships.iter().any(|r| !r.many),
            uses_datetime,
            uses_hashmap,
            name,
            module,
            schema_name: candidate.schema_name.to_string(),
            resource_type: candidate.resource_type.clone(),
            description: candidate.schema.description.clone(),
            attributes,
            relationships,
            enums,
            paths: route.paths,
            list_parameters,
            has_include,
        }
    }

    /// Renders every referenced component, following nested references.
    fn component_types(&mut self) -> (Vec<StructModel>, Vec<EnumModel>) {
        let spec = self.spec;
        let mut structs = Vec::new();
        let mut enums = Vec::new();
        let mut done = BTreeSet::new();

        loop {
            let pending: Vec<String> = self.components.difference(&done).cloned().collect();
            if pending.is_empty() {
                break;
            }
            for name in pending {
                done.insert(name.clone());
                let Some(schema) = spec.resolve_schema_ref(&format!("{SCHEMA_REF_PREFIX}{name}")) else {
                    continue;
                };
                let rust_name = type_name(&name);
                if schema.string_enum().is_empty() {
                    let fields = self.fields(schema, &rust_name, &mut enums);
                    structs.push(StructModel {
                        name: rust_name,
                        description: schema.description.clone(),
                        fields,
                    });
                } else {
                    push_enum(&mut enums, enum_model(&rust_name, schema));
                }
            }
        }

        structs.sort_by(|a, b| a.name.cmp(&b.name));
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        (structs, enums)
    }
}

fn fallback_type(relationship: &str, many: bool) -> String {
    if many || relationship.ends_with('s') {
        relationship.to_string()
    } else {
        format!("{relationship}s")
    }
}

fn query_parameters(spec: &OpenApiSpec, parameters: &[&Parameter]) -> Vec<QueryParamModel> {
    let mut seen = BTreeSet::new();
    let mut models: Vec<QueryParamModel> = parameters
        .iter()
        .filter(|p| !p.name.starts_with("page[") && !matches!(p.name.as_str(), "include" | "page"))
        .filter(|p| seen.insert(p.name.clone()))
        .map(|p| {
            let schema = p.schema.as_ref().and_then(|s| spec.resolve(s));
            let rust_type = match schema.and_then(Schema::type_name) {
                Some("integer") => "i64",
                Some("boolean") => "bool",
                _ => "String",
            };
            QueryParamModel {
                key: p.name.clone(),
                field: field_name(&p.name),
                rust_type: rust_type.to_string(),
                description: p.description.clone(),
            }
        })
        .collect();

    let mut names: Vec<String> = models.iter().map(|m| m.field.clone()).collect();
    dedupe(&mut names);
    for (model, name) in models.iter_mut().zip(names) {
        model.field = name;
    }
    models
}

/// Paths and list parameters of one resource.
#[derive(Default)]
struct Route<'a> {
    paths: Vec<PathModel>,
    list_parameters: Vec<&'a Parameter>,
}

/// A path split into its template, placeholders and collection.
#[derive(Debug, PartialEq, Eq)]
struct ParsedPath {
    template: String,
    ids: Vec<String>,
    is_item: bool,
    /// Template of the collection the path belongs to.
    collection: String,
    last_literal: Option<String>,
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

fn parse_path(raw: &str, base_path: Option<&str>) -> ParsedPath {
    let relative = base_path
        .and_then(|base| raw.strip_prefix(base))
        .unwrap_or(raw);
    let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
    let is_item = segments.last().is_some_and(|s| is_placeholder(s));

    let mut ids = Vec::new();
    let mut parts = Vec::new();
    let mut previous_literal = "";
    for (index, segment) in segments.iter().copied().enumerate() {
        if is_placeholder(segment) {
            let name = if is_item && index == segments.len() - 1 {
                "id".to_string()
            } else {
                match to_snake_case(&segment[1..segment.len() - 1]) {
                    name if name == "id" || name.is_empty() => {
                        format!("{}_id", to_snake_case(previous_literal))
                    }
                    name => name,
                }
            };
            parts.push(format!("{{{name}}}"));
            ids.push(name);
        } else {
            previous_literal = segment;
            parts.push(segment.to_string());
        }
    }

    let template = parts.join("/");
    let collection = if is_item {
        parts[..parts.len() - 1].join("/")
    } else {
        template.clone()
    };

    ParsedPath {
        template,
        ids,
        is_item,
        collection,
        last_literal: segments
            .iter()
            .rev()
            .find(|s| !is_placeholder(s))
            .map(|s| (*s).to_string()),
    }
}

/// The operations of a path as `(method, operation, op)`.
fn operations<'a>(item: &'a PathItem, is_item: bool) -> Vec<(&'static str, &'static str, &'a Operation)> {
    let mut operations = Vec::new();
    if is_item {
        if let Some(op) = &item.get {
            operations.push(("Get", "Read", op));
        }
        if let Some(op) = &item.patch {
            operations.push(("Patch", "Update", op));
        } else if let Some(op) = &item.put {
            operations.push(("Put", "Update", op));
        }
        if let Some(op) = &item.delete {
            operations.push(("Delete", "Delete", op));
        }
    } else {
        if let Some(op) = &item.get {
            operations.push(("Get", "List", op));
        }
        if let Some(op) = &item.post {
            operations.push(("Post", "Create", op));
        }
    }
    operations
}

/// Returns the JSON:API type an operation responds with.
fn response_type(spec: &OpenApiSpec, operation: &Operation) -> Option<String> {
    ["200", "201"]
        .iter()
        .filter_map(|code| operation.responses.get(*code))
        .flat_map(|response| response.content.values())
        .filter_map(|media| media.schema.as_ref())
        .find_map(|schema| {
            let schema = spec.resolve(schema)?;
            let view = object_view(spec, schema);
            let data = spec.resolve(view.properties.get("data")?)?;
            let data = match data.items.as_deref() {
                Some(items) => spec.resolve(items)?,
                None => data,
            };
            resource_type_of(spec, data)
        })
}

/// Whether a collection segment names a resource type, directly or as the
/// tail of a nested type (`parameters` for `provider-configuration-parameters`).
fn segment_matches(resource_type: &str, segment: &str) -> bool {
    resource_type == segment || resource_type.ends_with(&format!("-{segment}"))
}

fn collect_routes<'a>(spec: &'a OpenApiSpec, known_types: &BTreeSet<&str>) -> BTreeMap<String, Route<'a>> {
    let base_path = spec.server_base_path();
    let parsed: Vec<(ParsedPath, &'a PathItem)> = spec
        .paths
        .iter()
        .map(|(raw, item)| (parse_path(raw, base_path.as_deref()), item))
        .collect();

    // Collections whose responses name their resource.
    let mut collections: BTreeMap<&str, String> = BTreeMap::new();
    for (path, item) in &parsed {
        let item: &'a PathItem = *item;
        let Some(segment) = path.last_literal.as_deref() else {
            continue;
        };
        let responded = operations(item, path.is_item)
            .into_iter()
            .find_map(|(_, _, op)| response_type(spec, op))
            .filter(|t| segment_matches(t, segment));
        if let Some(resource_type) = responded {
            collections.insert(path.collection.as_str(), resource_type);
        }
    }

    let mut routes: BTreeMap<String, Route<'a>> = BTreeMap::new();
    for (path, item) in &parsed {
        let item: &'a PathItem = *item;
        let resource_type = collections.get(path.collection.as_str()).cloned().or_else(|| {
            path.last_literal
                .as_deref()
                .filter(|segment| known_types.contains(segment))
                .map(ToString::to_string)
        });
        let Some(resource_type) = resource_type else {
            continue;
        };

        let route = routes.entry(resource_type).or_default();
        for (method, operation, op) in operations(item, path.is_item) {
            let model = PathModel {
                method: method.to_string(),
                operation: operation.to_string(),
                ids: path.ids.clone(),
                template: path.template.clone(),
            };
            if !route.paths.contains(&model) {
                route.paths.push(model);
            }

            if operation == "List" {
                route.list_parameters.extend(
                    item.parameters
                        .iter()
                        .chain(&op.parameters)
                        .filter_map(|p| spec.resolve_parameter(p))
                        .filter(|p| p.location == "query"),
                );
            }
        }
    }

    let order = ["Read", "List", "Create", "Update", "Delete"];
    for route in routes.values_mut() {
        route.paths.sort_by_key(|p| {
            (
                order.iter().position(|o| *o == p.operation),
                std::cmp::Reverse(p.ids.len()),
            )
        });
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r"
openapi: 3.0.3
info:
  title: Scalr
  version: '3'
servers:
  - url: https://{host}/api/iacp/v3
paths:
  /workspaces:
    get:
      parameters:
        - name: filter[environment]
          in: query
          schema: {type: string}
        - name: filter[has-active-state]
          in: query
          schema: {type: boolean}
        - name: include
          in: query
          schema: {type: string}
        - name: page[number]
          in: query
          schema: {type: integer}
      responses:
        '200':
          description: ok
          content:
            application/vnd.api+json:
              schema:
                type: object
                properties:
                  data:
                    type: array
                    items: {$ref: '#/components/schemas/Workspace'}
    post:
      responses:
        '201':
          description: created
          content:
            application/vnd.api+json:
              schema:
                properties:
                  data: {$ref: '#/components/schemas/Workspace'}
  /workspaces/{workspace}:
    get:
      responses:
        '200':
          description: ok
          content:
            application/vnd.api+json:
              schema:
                properties:
                  data: {$ref: '#/components/schemas/Workspace'}
    patch:
      responses:
        '200': {description: ok}
    delete:
      responses:
        '204': {description: deleted}
  /workspaces/{workspace}/actions/lock:
    post:
      responses:
        '200':
          description: ok
          content:
            application/vnd.api+json:
              schema:
                properties:
                  data: {$ref: '#/components/schemas/Workspace'}
  /environments/{environment}/tags:
    get:
      responses:
        '200': {description: ok}
components:
  schemas:
    Workspace:
      description: A workspace.
      type: object
      properties:
        id: {type: string, readOnly: true}
        type:
          type: string
          enum: [workspaces]
        attributes:
          type: object
          required: [name]
          properties:
            name: {type: string}
            execution-mode:
              type: string
              enum: [remote, local]
            created-at: {type: string, format: date-time, readOnly: true}
            run-operation-timeout: {type: integer, nullable: true}
            vcs-repo: {$ref: '#/components/schemas/VcsRepo'}
            type: {type: string}
        relationships:
          type: object
          required: [environment]
          properties:
            environment:
              type: object
              properties:
                data: {$ref: '#/components/schemas/EnvironmentIdentifier'}
            tags:
              type: object
              properties:
                data:
                  type: array
                  items:
                    type: object
                    properties:
                      type: {type: string, enum: [tags]}
                      id: {type: string}
            created-by:
              readOnly: true
              type: object
              properties:
                data:
                  oneOf:
                    - {type: 'null'}
                    - type: object
                      properties:
                        type: {type: string, enum: [users]}
    WorkspaceCreateRequest:
      properties:
        type: {type: string, enum: [workspaces]}
        attributes: {type: object}
    Tag:
      properties:
        type: {type: string, enum: [tags]}
        attributes:
          properties:
            name: {type: string}
    EnvironmentIdentifier:
      properties:
        type: {type: string, enum: [environments]}
        id: {type: string}
    VcsRepo:
      properties:
        identifier: {type: string}
        trigger-prefixes:
          type: array
          items: {type: string}
        mode: {$ref: '#/components/schemas/VcsMode'}
    VcsMode:
      type: string
      enum: [default, git-flow]
";

    fn model() -> ApiModel {
        build_model(&OpenApiSpec::parse(SPEC).unwrap(), &[]).unwrap()
    }

    fn workspace(model: &ApiModel) -> &ResourceModel {
        model
            .resources
            .iter()
            .find(|r| r.resource_type == "workspaces")
            .unwrap()
    }

    #[test]
    fn test_finds_resources_by_type_and_attributes() {
        let model = model();
        let types: Vec<&str> = model.resources.iter().map(|r| r.resource_type.as_str()).collect();
        assert_eq!(types, vec!["tags", "workspaces"]);

        let workspace = workspace(&model);
        assert_eq!(workspace.name, "Workspace");
        assert_eq!(workspace.schema_name, "Workspace");
        assert_eq!(workspace.module, "workspace");
        assert_eq!(workspace.description.as_deref(), Some("A workspace."));
    }

    #[test]
    fn test_attribute_types() {
        let model = model();
        let attributes = &workspace(&model).attributes;
        let find = |name: &str| attributes.iter().find(|a| a.json_name == name).unwrap();

        assert_eq!(find("name").rust_type, "String");
        assert!(find("name").required);
        assert!(find("name").is_string);
        assert_eq!(find("execution-mode").rust_type, "WorkspaceExecutionMode");
        assert_eq!(find("execution-mode").field, "execution_mode");
        assert_eq!(find("created-at").rust_type, "DateTime<Utc>");
        assert!(find("created-at").read_only);
        assert_eq!(find("run-operation-timeout").rust_type, "i64");
        assert!(find("run-operation-timeout").nullable);
        assert_eq!(find("vcs-repo").rust_type, "VcsRepo");
        assert_eq!(find("type").field, "r#type");
    }

    #[test]
    fn test_inline_enum() {
        let model = model();
        let enums = &workspace(&model).enums;
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].name, "WorkspaceExecutionMode");
        let variants: Vec<(&str, &str)> = enums[0]
            .variants
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(variants, vec![("Remote", "remote"), ("Local", "local")]);
    }

    #[test]
    fn test_enum_value_named_unknown_is_renamed() {
        let schema: Schema =
            serde_json::from_value(serde_json::json!({"type": "string", "enum": ["ok", "unknown"]}))
                .unwrap();
        let model = enum_model("RunStatus", &schema);
        let variants: Vec<(&str, &str)> = model
            .variants
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(variants, vec![("Ok", "ok"), ("Unknown2", "unknown")]);
    }

    #[test]
    fn test_relationships() {
        let model = model();
        let relationships = &workspace(&model).relationships;
        let find = |name: &str| relationships.iter().find(|r| r.json_name == name).unwrap();

        let environment = find("environment");
        assert!(!environment.many);
        assert!(environment.required);
        assert_eq!(environment.target_type, "environments");

        let tags = find("tags");
        assert!(tags.many);
        assert_eq!(tags.target_type, "tags");

        let created_by = find("created-by");
        assert!(created_by.read_only);
        assert_eq!(created_by.target_type, "users");
        assert_eq!(created_by.field, "created_by");
    }

    #[test]
    fn test_paths() {
        let model = model();
        let paths: Vec<(&str, &str, &str)> = workspace(&model)
            .paths
            .iter()
            .map(|p| (p.method.as_str(), p.operation.as_str(), p.template.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("Get", "Read", "workspaces/{id}"),
                ("Get", "List", "workspaces"),
                ("Post", "Create", "workspaces"),
                ("Patch", "Update", "workspaces/{id}"),
                ("Delete", "Delete", "workspaces/{id}"),
            ]
        );
    }

    #[test]
    fn test_nested_collection_matched_by_segment() {
        let model = model();
        let tag = model.resources.iter().find(|r| r.resource_type == "tags").unwrap();
        assert_eq!(tag.paths.len(), 1);
        assert_eq!(tag.paths[0].template, "environments/{environment}/tags");
        assert_eq!(tag.paths[0].ids, vec!["environment"]);
    }

    #[test]
    fn test_list_parameters() {
        let model = model();
        let workspace = workspace(&model);
        let keys: Vec<(&str, &str, &str)> = workspace
            .list_parameters
            .iter()
            .map(|p| (p.key.as_str(), p.field.as_str(), p.rust_type.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("filter[environment]", "filter_environment", "String"),
                ("filter[has-active-state]", "filter_has_active_state", "bool"),
            ]
        );
        assert!(workspace.has_include);
    }

    #[test]
    fn test_import_flags() {
        let model = model();
        let workspace = workspace(&model);
        assert!(workspace.uses_datetime);
        assert!(!workspace.uses_hashmap);
        assert!(workspace.uses_to_one);
        assert!(workspace.uses_to_many);
        assert!(workspace.uses_require_non_blank);
        assert!(!workspace.uses_require);
    }

    #[test]
    fn test_component_types_follow_references() {
        let model = model();
        let names: Vec<&str> = model.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["VcsRepo"]);
        let fields: Vec<&str> = model.types[0]
            .fields
            .iter()
            .map(|f| f.rust_type.as_str())
            .collect();
        assert_eq!(fields, vec!["String", "VcsMode", "Vec<String>"]);

        assert_eq!(model.enums.len(), 1);
        assert_eq!(model.enums[0].name, "VcsMode");
        assert_eq!(model.enums[0].variants[1].name, "GitFlow");
    }

    #[test]
    fn test_only_filter() {
        let spec = OpenApiSpec::parse(SPEC).unwrap();
        let model = build_model(&spec, &["Tags".to_string()]).unwrap();
        assert_eq!(model.resources.len(), 1);
        assert_eq!(model.resources[0].name, "Tag");
        assert!(model.types.is_empty());

        let by_module = build_model(&spec, &["workspace".to_string()]).unwrap();
        assert_eq!(by_module.resources[0].resource_type, "workspaces");

        let error = build_model(&spec, &["runs".to_string()]).unwrap_err();
        assert!(error.to_string().contains("runs"));
    }

    #[test]
    fn test_no_resources() {
        let spec = OpenApiSpec::parse("openapi: 3.0.0\ninfo: {title: t, version: '1'}\n").unwrap();
        assert!(matches!(build_model(&spec, &[]), Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_parse_path() {
        let path = parse_path(
            "/api/iacp/v3/provider-configurations/{provider_configuration}/parameters/{id}",
            Some("/api/iacp/v3"),
        );
        assert!(path.is_item);
        assert_eq!(
            path.template,
            "provider-configurations/{provider_configuration}/parameters/{id}"
        );
        assert_eq!(path.ids, vec!["provider_configuration", "id"]);
        assert_eq!(
            path.collection,
            "provider-configurations/{provider_configuration}/parameters"
        );
        assert_eq!(path.last_literal.as_deref(), Some("parameters"));

        let nested = parse_path("/accounts/{id}/workspaces", None);
        assert_eq!(nested.template, "accounts/{accounts_id}/workspaces");
        assert!(!nested.is_item);
    }

    #[test]
    fn test_segment_matches() {
        assert!(segment_matches("workspaces", "workspaces"));
        assert!(segment_matches("provider-configuration-parameters", "parameters"));
        assert!(!segment_matches("workspaces", "lock"));
    }
}
