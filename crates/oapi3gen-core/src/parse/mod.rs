pub mod components;
pub mod content;
mod literal;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod reference;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::Specification;

/// Parse an API description from YAML.
pub fn from_yaml(input: &str) -> Result<Specification, ParseError> {
    let spec: Specification = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    log::debug!(
        "parsed '{}' ({} paths, {} schemas, {} responses)",
        spec.info.title,
        spec.paths.len(),
        spec.components.schemas.len(),
        spec.components.responses.len()
    );
    Ok(spec)
}

/// Parse an API description from JSON.
pub fn from_json(input: &str) -> Result<Specification, ParseError> {
    let spec: Specification = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &Specification) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}
