//! OpenAPI to Rust code generator.
//!
//! Reads an OpenAPI 3 document (JSON or YAML), extracts its JSON:API
//! resources and renders one module per resource, built on the
//! [`ApiResource`](crate::rest::ApiResource) machinery of this crate.
//!
//! # Output Layout
//!
//! ```text
//! <output>/<module>/mod.rs        re-exports
//! <output>/<module>/types.rs      shared component schemas, if any
//! <output>/<module>/<resource>.rs one per resource
//! ```
//!
//! # Example
//!
//! ```rust
//! use scalr_api::generator::{Generator, GeneratorOptions, OpenApiSpec};
//!
//! let spec = OpenApiSpec::parse(r#"
//! openapi: 3.0.3
//! info: {title: Scalr, version: '3'}
//! paths:
//!   /tags:
//!     get:
//!       responses:
//!         '200': {description: ok}
//! components:
//!   schemas:
//!     Tag:
//!       properties:
//!         type: {type: string, enum: [tags]}
//!         attributes:
//!           properties:
//!             name: {type: string}
//! "#).unwrap();
//!
//! let generator = Generator::new(GeneratorOptions::default()).unwrap();
//! let files = generator.render(&spec).unwrap();
//!
//! let names: Vec<_> = files.iter().map(|f| f.path.display().to_string()).collect();
//! assert_eq!(names, vec!["scalr/tag.rs", "scalr/mod.rs"]);
//! assert!(files[0].contents.contains("pub type Tag = Resource<TagAttributes, TagRelationships>;"));
//! ```

mod error;
mod model;
mod naming;
mod openapi;
mod templates;

pub use error::{GeneratorError, Result};
pub use model::{
    build_model, ApiModel, EnumModel, FieldModel, PathModel, QueryParamModel, RelationshipModel,
    ResourceModel, StructModel, VariantModel,
};
pub use naming::{field_name, sanitize_module_name, to_pascal_case, to_snake_case, type_name};
pub use openapi::{
    AdditionalProperties, Components, Info, MediaType, OpenApiSpec, Operation, Parameter,
    ParameterOrRef, PathItem, RequestBody, Response, Schema, SchemaOrRef, SchemaType, Server,
};

use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::{debug, info};

/// Settings of a [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the generated module directory.
    pub module_name: String,
    /// Path of this crate as seen from the generated code: `scalr_api`
    /// outside the crate, `crate` inside it.
    pub crate_path: String,
    /// Resources to render; all when empty.
    pub only: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            module_name: "scalr".to_string(),
            crate_path: "scalr_api".to_string(),
            only: Vec::new(),
        }
    }
}

/// A rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Renders Rust sources from an OpenAPI document.
#[derive(Debug)]
pub struct Generator {
    tera: Tera,
    options: GeneratorOptions,
}

impl Generator {
    /// Creates a generator.
    ///
    /// The module name is sanitized (`Scalr API` becomes `scalr_api`).
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Generation`] if the module name has no
    /// usable characters, the crate path is empty, or a template fails to
    /// load.
    pub fn new(mut options: GeneratorOptions) -> Result<Self> {
        options.module_name = sanitize_module_name(&options.module_name).ok_or_else(|| {
            GeneratorError::Generation(format!(
                "invalid module name: {:?}",
                options.module_name
            ))
        })?;

        let crate_path = options.crate_path.trim();
        if crate_path.is_empty() {
            return Err(GeneratorError::Generation(
                "crate path cannot be empty".to_string(),
            ));
        }
        options.crate_path = crate_path.to_string();

        Ok(Self {
            tera: templates::load_templates()?,
            options,
        })
    }

    /// Returns the effective options.
    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Renders every file without touching the filesystem.
    ///
    /// Resource modules come first in module order, followed by `types.rs`
    /// when component schemas are referenced, and `mod.rs` last.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Parse`] if no resources are found and
    /// [`GeneratorError::Template`] if rendering fails.
    pub fn render(&self, spec: &OpenApiSpec) -> Result<Vec<GeneratedFile>> {
        let model = build_model(spec, &self.options.only)?;
        let has_types = !model.types.is_empty() || !model.enums.is_empty();
        let directory = PathBuf::from(&self.options.module_name);

        let mut base = Context::new();
        base.insert("title", &model.title);
        base.insert("version", &model.version);
        base.insert("crate_path", &self.options.crate_path);
        base.insert("has_types", &has_types);

        let mut files = Vec::with_capacity(model.resources.len() + 2);
        for resource in &model.resources {
            let mut context = base.clone();
            context.insert("resource", resource);
            let contents = self.tera.render("resource.rs", &context)?;
            debug!(resource = %resource.resource_type, module = %resource.module, "rendered resource");
            files.push(GeneratedFile {
                path: directory.join(format!("{}.rs", resource.module)),
                contents,
            });
        }

        if has_types {
            let mut context = base.clone();
            context.insert("types", &model.types);
            context.insert("enums", &model.enums);
            context.insert("types_use_datetime", &model.types_use_datetime);
            context.insert("types_use_hashmap", &model.types_use_hashmap);
            files.push(GeneratedFile {
                path: directory.join("types.rs"),
                contents: self.tera.render("types.rs", &context)?,
            });
        }

        let mut context = base;
        context.insert("resources", &model.resources);
        files.push(GeneratedFile {
            path: directory.join("mod.rs"),
            contents: self.tera.render("mod.rs", &context)?,
        });

        Ok(files)
    }

    /// Renders every file and writes it under `output`.
    ///
    /// Returns the written paths.
    ///
    /// # Errors
    ///
    /// Same as [`render()`](Self::render), plus [`GeneratorError::Io`] if a
    /// file cannot be written.
    pub fn generate(&self, spec: &OpenApiSpec, output: &Path) -> Result<Vec<PathBuf>> {
        let files = self.render(spec)?;
        write_files(&files, output)
    }
}

/// Writes rendered files under `output`, creating directories as needed.
///
/// # Errors
///
/// Returns [`GeneratorError::Io`] if a directory or file cannot be written.
pub fn write_files(files: &[GeneratedFile], output: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.contents)?;
        info!(path = %path.display(), bytes = file.contents.len(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

// Verify Generator is Send + Sync.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Generator>();
};
