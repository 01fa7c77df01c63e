use crate::errors::ArgumentError;

/// Parses a revision count limit. Zero and non-integers are rejected.
pub fn parse_limit(input: &str) -> Result<usize, ArgumentError> {
    match input.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ArgumentError::InvalidLimit(input.to_string())),
    }
}

/// Validates the script name of a new revision. The name becomes the part after
/// the id in `<id>_<name>.sql`, so it must not contain `_`.
pub fn parse_revision_name(input: &str) -> Result<String, ArgumentError> {
    let name = input.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ArgumentError::InvalidRevisionName(input.to_string()));
    }
    Ok(name.to_string())
}
