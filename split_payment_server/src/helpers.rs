use crate::errors::ServerError;

/// Trims and returns a required caller-supplied field, or fails with `InvalidRequest` naming the missing field.
/// Validation errors are reported at the boundary, never silently defaulted.
pub fn required_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ServerError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest(format!("{name} is required")))
}
