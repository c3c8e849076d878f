//! `allOf` flattening.

use crate::error::ResolveError;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::reference::Ref;
use crate::parse::schema::{Schema, SchemaType};

/// Derive the object a schema with `allOf` stands for.
///
/// Properties are layered: the schema's own properties first, then each
/// member in order, later members overwriting earlier ones on name clashes.
/// Referenced members contribute the properties of the schema they resolve
/// to. `required` lists are unioned in the same order. Schemas without
/// `allOf` are returned unchanged; `anyOf` is left alone. The input is never
/// modified.
pub fn expand_all_of(resolver: &RefResolver<'_>, schema: &Schema) -> Result<Schema, ResolveError> {
    if schema.all_of.is_empty() {
        return Ok(schema.clone());
    }
    let mut stack = Vec::new();
    flatten(resolver, schema, &mut stack)
}

fn flatten(
    resolver: &RefResolver<'_>,
    schema: &Schema,
    stack: &mut Vec<String>,
) -> Result<Schema, ResolveError> {
    let mut properties = schema.properties.clone();
    let mut required = schema.required.clone();

    for member in &schema.all_of {
        let layer = member_layer(resolver, member, stack)?;
        properties.extend(layer.properties);
        for name in layer.required {
            if !required.contains(&name) {
                required.push(name);
            }
        }
    }

    Ok(Schema {
        reference: Ref::default(),
        all_of: Vec::new(),
        schema_type: Some(SchemaType::Object),
        properties,
        required,
        ..schema.clone()
    })
}

fn member_layer(
    resolver: &RefResolver<'_>,
    member: &Schema,
    stack: &mut Vec<String>,
) -> Result<Schema, ResolveError> {
    if !member.is_reference() {
        return if member.all_of.is_empty() {
            Ok(member.clone())
        } else {
            flatten(resolver, member, stack)
        };
    }

    let locator = member.reference.to_string();
    if stack.contains(&locator) {
        return Err(ResolveError::CircularRef(locator));
    }
    stack.push(locator);
    let target = resolver.resolve_schema(&member.reference)?;
    let layer = if target.all_of.is_empty() {
        target.clone()
    } else {
        flatten(resolver, target, stack)?
    };
    stack.pop();
    Ok(layer)
}
