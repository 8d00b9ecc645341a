//! Identifier conversion for generated code.

/// Words that cannot be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers either.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Converts any identifier style to `snake_case`.
///
/// Case changes start a new word, and every character that is not
/// alphanumeric (`-`, `.`, `[`, spaces) separates words.
///
/// # Example
///
/// ```rust
/// use scalr_api::generator::to_snake_case;
///
/// assert_eq!(to_snake_case("ProviderConfiguration"), "provider_configuration");
/// assert_eq!(to_snake_case("auto-queue-runs"), "auto_queue_runs");
/// assert_eq!(to_snake_case("filter[environment]"), "filter_environment");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// ```
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));
            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() || ch == '_' {
            result.push(ch);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}

/// Converts any identifier style to `PascalCase`.
///
/// # Example
///
/// ```rust
/// use scalr_api::generator::to_pascal_case;
///
/// assert_eq!(to_pascal_case("agent-pools"), "AgentPools");
/// assert_eq!(to_pascal_case("vcs_provider"), "VcsProvider");
/// assert_eq!(to_pascal_case("SshKey"), "SshKey");
/// ```
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Escapes a snake case name that collides with a keyword.
#[must_use]
pub fn escape_keyword(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Returns a struct field name for a JSON member name.
///
/// # Example
///
/// ```rust
/// use scalr_api::generator::field_name;
///
/// assert_eq!(field_name("execution-mode"), "execution_mode");
/// assert_eq!(field_name("type"), "r#type");
/// assert_eq!(field_name("self"), "self_");
/// assert_eq!(field_name("2fa"), "_2fa");
/// ```
#[must_use]
pub fn field_name(json_name: &str) -> String {
    let snake = to_snake_case(json_name);
    if snake.is_empty() {
        return "field".to_string();
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{snake}");
    }
    escape_keyword(&snake)
}

/// Returns a type or variant name for a JSON value or component name.
///
/// # Example
///
/// ```rust
/// use scalr_api::generator::type_name;
///
/// assert_eq!(type_name("remote"), "Remote");
/// assert_eq!(type_name("tf-cloud"), "TfCloud");
/// assert_eq!(type_name("1.5"), "V1_5");
/// assert_eq!(type_name(""), "Empty");
/// ```
#[must_use]
pub fn type_name(name: &str) -> String {
    let pascal = to_pascal_case(name);
    if pascal.is_empty() {
        return "Empty".to_string();
    }
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        // Keep digit groups apart: "1.5" must not collide with "15".
        return format!("V{}", to_snake_case(name));
    }
    if pascal == "Self" {
        return "SelfValue".to_string();
    }
    pascal
}

/// Sanitizes a user-supplied module name.
///
/// Returns `None` if nothing usable remains.
///
/// # Example
///
/// ```rust
/// use scalr_api::generator::sanitize_module_name;
///
/// assert_eq!(sanitize_module_name("Scalr-API v3").as_deref(), Some("scalr_api_v3"));
/// assert_eq!(sanitize_module_name("3").as_deref(), Some("v3"));
/// assert_eq!(sanitize_module_name("mod").as_deref(), Some("mod_"));
/// assert_eq!(sanitize_module_name("--"), None);
/// ```
#[must_use]
pub fn sanitize_module_name(name: &str) -> Option<String> {
    let snake: String = to_snake_case(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if snake.is_empty() {
        return None;
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(format!("v{snake}"));
    }
    if KEYWORDS.contains(&snake.as_str()) || RESERVED.contains(&snake.as_str()) {
        return Some(format!("{snake}_"));
    }
    Some(snake)
}

/// Makes every name in the list unique by suffixing repeats with a counter.
pub(crate) fn dedupe(names: &mut [String]) {
    let mut seen = std::collections::HashSet::new();
    for name in names.iter_mut() {
        if !seen.insert(name.clone()) {
            let mut counter = 2;
            let base = name.clone();
            while !seen.insert(format!("{base}{counter}")) {
                counter += 1;
            }
            *name = format!("{base}{counter}");
        }
    }
}
