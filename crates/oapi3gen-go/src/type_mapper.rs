use oapi3gen_core::ResolveError;
use oapi3gen_core::parse::schema::{AdditionalProperties, Schema, SchemaType};

/// Rendered in place of a type that has no Go counterpart.
pub const UNKNOWN_TYPE: &str = "<unknown_type>";

/// Go type of an open map whose values are not described.
pub const ANY_MAP: &str = "map[string]interface{}";

/// Map a scalar `type` + `format` pair to its Go type. The format wins when
/// it names a sized number.
pub fn scalar_to_go(schema_type: Option<&SchemaType>, format: Option<&str>) -> &'static str {
    match format {
        Some("int32") => return "int32",
        Some("int64") => return "int64",
        Some("float") => return "float32",
        Some("double") => return "float64",
        _ => {}
    }
    match schema_type {
        Some(SchemaType::String) => "string",
        Some(SchemaType::Number) => "float64",
        Some(SchemaType::Integer) => "int64",
        Some(SchemaType::Boolean) => "bool",
        _ => UNKNOWN_TYPE,
    }
}

/// Map a schema to the Go type expression used where it appears.
///
/// References become the generated type name, arrays become slices of their
/// item type and open maps become `map[string]V`. Inline objects at field
/// level are rendered by the templates; one nested under `items` or
/// `additionalProperties` has no Go name here and maps to [`UNKNOWN_TYPE`].
/// An object without properties is `struct{}`.
pub fn schema_to_go(schema: &Schema) -> Result<String, ResolveError> {
    if schema.is_reference() {
        return schema.reference.type_name();
    }
    if schema.is_open_map() {
        return match &schema.additional_properties {
            Some(AdditionalProperties::Schema(values)) if values.is_set() => {
                Ok(format!("map[string]{}", schema_to_go(values)?))
            }
            _ => Ok(ANY_MAP.to_string()),
        };
    }
    if schema.is_array() {
        let item = match &schema.items {
            Some(items) if items.is_set() => schema_to_go(items)?,
            _ => "interface{}".to_string(),
        };
        return Ok(format!("[]{item}"));
    }
    if !schema.properties.is_empty() || !schema.all_of.is_empty() {
        log::warn!("inline object has no Go type name here, emitting {UNKNOWN_TYPE}");
        return Ok(UNKNOWN_TYPE.to_string());
    }
    if schema.is_object() {
        return Ok("struct{}".to_string());
    }
    Ok(scalar_to_go(schema.schema_type.as_ref(), schema.format.as_deref()).to_string())
}
