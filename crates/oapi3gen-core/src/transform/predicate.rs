//! Shape predicates evaluated along a schema's reference chain.

use std::collections::HashSet;

use crate::error::ResolveError;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::Schema;

/// Apply `predicate` to `schema`, then to each schema down its `$ref` chain,
/// stopping at the first node that satisfies it or at the first inline node.
///
/// Composition members are never visited.
pub fn evaluate<F>(
    resolver: &RefResolver<'_>,
    schema: &Schema,
    predicate: F,
) -> Result<bool, ResolveError>
where
    F: Fn(&Schema) -> bool,
{
    let mut seen = HashSet::new();
    let mut current = schema;
    loop {
        if predicate(current) {
            return Ok(true);
        }
        if !current.is_reference() {
            return Ok(false);
        }
        if !seen.insert(current.reference.as_str()) {
            return Err(ResolveError::CircularRef(current.reference.to_string()));
        }
        current = resolver.lookup_schema(&current.reference)?;
    }
}

/// Maps and slices: the generated type already has a nil zero value.
pub fn nilable(schema: &Schema) -> bool {
    schema.is_open_map() || schema.is_array()
}

/// Maps, slices and scalars: the generated type has a natural empty value,
/// so an optional field needs no pointer to be omitted.
pub fn omittable(schema: &Schema) -> bool {
    nilable(schema) || schema.is_primitive()
}

/// Objects that become generated structs.
pub fn struct_shaped(schema: &Schema) -> bool {
    schema.is_object() && !schema.is_open_map()
}

impl RefResolver<'_> {
    pub fn is_nilable(&self, schema: &Schema) -> Result<bool, ResolveError> {
        evaluate(self, schema, nilable)
    }

    pub fn is_omittable(&self, schema: &Schema) -> Result<bool, ResolveError> {
        evaluate(self, schema, omittable)
    }

    pub fn is_struct(&self, schema: &Schema) -> Result<bool, ResolveError> {
        evaluate(self, schema, struct_shaped)
    }
}
