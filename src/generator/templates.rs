//! Template loading and custom filters.

use std::collections::HashMap;

use tera::{Tera, Value};

use super::error::{GeneratorError, Result};

/// Loads all templates.
///
/// # Errors
///
/// Returns [`GeneratorError::Generation`] if a template does not parse.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    tera.register_filter("doc", doc_filter);
    tera.register_filter("rust_string", rust_string_filter);

    tera.add_raw_template("resource.rs", include_str!("../../templates/resource.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load resource.rs template: {e}"))
        })?;

    tera.add_raw_template("types.rs", include_str!("../../templates/types.rs.tera"))
        .map_err(|e| GeneratorError::Generation(format!("Failed to load types.rs template: {e}")))?;

    tera.add_raw_template("mod.rs", include_str!("../../templates/mod.rs.tera"))
        .map_err(|e| GeneratorError::Generation(format!("Failed to load mod.rs template: {e}")))?;

    Ok(tera)
}

/// Turns text into comment lines.
///
/// Arguments: `indent` (default none) and `prefix` (default `///`).
fn doc_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("doc filter expects a string"))?;
    let indent = args.get("indent").and_then(Value::as_str).unwrap_or("");
    let prefix = args.get("prefix").and_then(Value::as_str).unwrap_or("///");

    let lines: Vec<String> = text
        .trim()
        .lines()
        .map(|line| {
            let line = line.trim_end().replace("*/", "* /");
            if line.is_empty() {
                format!("{indent}{prefix}")
            } else {
                format!("{indent}{prefix} {line}")
            }
        })
        .collect();

    Ok(Value::String(lines.join("\n")))
}

/// Quotes a value as a Rust string literal.
fn rust_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_string filter expects a string"))?;
    Ok(Value::String(format!("{text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        for name in ["resource.rs", "types.rs", "mod.rs"] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_doc_filter() {
        let mut args = HashMap::new();
        args.insert("indent".to_string(), json!("    "));

        let value = doc_filter(&json!("First line.\n\nSecond line.  \n"), &args).unwrap();
        assert_eq!(
            value,
            json!("    /// First line.\n    ///\n    /// Second line.")
        );

        let mut args = HashMap::new();
        args.insert("prefix".to_string(), json!("//!"));
        assert_eq!(doc_filter(&json!("Module."), &args).unwrap(), json!("//! Module."));

        assert!(doc_filter(&json!(1), &HashMap::new()).is_err());
    }

    #[test]
    fn test_rust_string_filter() {
        let value = rust_string_filter(&json!("filter[name]"), &HashMap::new()).unwrap();
        assert_eq!(value, json!("\"filter[name]\""));

        let value = rust_string_filter(&json!("say \"hi\""), &HashMap::new()).unwrap();
        assert_eq!(value, json!(r#""say \"hi\"""#));
    }
}
