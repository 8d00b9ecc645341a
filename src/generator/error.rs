//! Error types for the OpenAPI code generator.

use thiserror::Error;

/// Errors raised while loading an OpenAPI document or rendering code.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The document is structurally valid but cannot be turned into resources.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rendering or assembling the generated sources failed.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Reading the document or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
