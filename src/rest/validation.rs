//! Client-side checks run before a request is sent.

use crate::rest::ResourceError;
use crate::value::TriState;

/// Checks that an id is non-empty and made of `[A-Za-z0-9._:-]`.
///
/// Colons appear in permission ids such as `workspaces:read`.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidId`] otherwise.
///
/// # Example
///
/// ```rust
/// use scalr_api::rest::validate_id;
///
/// assert!(validate_id("Workspace", "ws-v0o2fa1lbf7dd8qg4").is_ok());
/// assert!(validate_id("Workspace", "").is_err());
/// assert!(validate_id("Workspace", "../etc").is_err());
/// ```
pub fn validate_id(resource: &'static str, id: &str) -> Result<(), ResourceError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-'))
        && id != "."
        && id != "..";
    if valid {
        Ok(())
    } else {
        Err(ResourceError::InvalidId {
            resource,
            id: id.to_string(),
        })
    }
}

/// Checks that a field required on create carries a value.
///
/// # Errors
///
/// Returns [`ResourceError::RequiredField`] if the field is unset or null.
pub fn require<T>(
    resource: &'static str,
    field: &'static str,
    value: &TriState<T>,
) -> Result<(), ResourceError> {
    match value {
        TriState::Value(_) => Ok(()),
        TriState::Unset | TriState::Null => Err(ResourceError::RequiredField { resource, field }),
    }
}

/// Checks that a required string field carries a non-blank value.
///
/// # Errors
///
/// Returns [`ResourceError::RequiredField`] if the field is unset, null or
/// blank.
pub fn require_non_blank(
    resource: &'static str,
    field: &'static str,
    value: &TriState<String>,
) -> Result<(), ResourceError> {
    match value {
        TriState::Value(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ResourceError::RequiredField { resource, field }),
    }
}

/// Validates an optional relationship id.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidId`] if a value is set and malformed.
pub fn validate_optional_id(
    resource: &'static str,
    value: &TriState<String>,
) -> Result<(), ResourceError> {
    value
        .as_option()
        .map_or(Ok(()), |id| validate_id(resource, id))
}
