use std::collections::HashSet;

use super::components::Components;
use super::reference::{ComponentKind, Ref};
use super::response::Response;
use super::schema::Schema;
use crate::error::ResolveError;

/// Follows `$ref` chains through the component namespaces.
///
/// Nothing is cached: every call walks the chain again, which keeps the
/// resolver free of state and safe to call repeatedly while rendering.
/// A chain that revisits a locator fails with [`ResolveError::CircularRef`].
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    components: &'a Components,
}

impl<'a> RefResolver<'a> {
    pub fn new(components: &'a Components) -> Self {
        Self { components }
    }

    /// The terminal (non-reference) schema a schema reference designates.
    pub fn resolve_schema(&self, reference: &Ref) -> Result<&'a Schema, ResolveError> {
        let mut seen = HashSet::new();
        let mut current = reference;
        loop {
            guard_cycle(&mut seen, current, reference)?;
            let schema = self.lookup_schema(current)?;
            if !schema.is_reference() {
                return Ok(schema);
            }
            log::trace!("{current} -> {}", schema.reference);
            current = &schema.reference;
        }
    }

    /// The terminal (non-reference) response a response reference designates.
    pub fn resolve_response(&self, reference: &Ref) -> Result<&'a Response, ResolveError> {
        let mut seen = HashSet::new();
        let mut current = reference;
        loop {
            guard_cycle(&mut seen, current, reference)?;
            let response = self.lookup_response(current)?;
            if !response.reference.is_set() {
                return Ok(response);
            }
            log::trace!("{current} -> {}", response.reference);
            current = &response.reference;
        }
    }

    /// The schema any reference ultimately stands for. A response resolves to
    /// its bindable content schema, which is unset when it has none.
    pub fn underlying_schema(&self, reference: &Ref) -> Result<Schema, ResolveError> {
        let mut seen = HashSet::new();
        let mut current = reference;
        loop {
            guard_cycle(&mut seen, current, reference)?;
            let (kind, _) = current.parts()?;
            let next = match kind {
                ComponentKind::Schemas => {
                    let schema = self.lookup_schema(current)?;
                    if !schema.is_reference() {
                        return Ok(schema.clone());
                    }
                    &schema.reference
                }
                ComponentKind::Responses => {
                    let response = self.lookup_response(current)?;
                    if !response.reference.is_set() {
                        return Ok(response
                            .content
                            .bindable_schema()
                            .cloned()
                            .unwrap_or_default());
                    }
                    &response.reference
                }
            };
            current = next;
        }
    }

    /// One step: the schema stored under a schema reference, which may itself
    /// be another reference.
    pub fn lookup_schema(&self, reference: &Ref) -> Result<&'a Schema, ResolveError> {
        let name = expect_kind(reference, ComponentKind::Schemas)?;
        self.components
            .schemas
            .get(name)
            .ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
    }

    pub fn lookup_response(&self, reference: &Ref) -> Result<&'a Response, ResolveError> {
        let name = expect_kind(reference, ComponentKind::Responses)?;
        self.components
            .responses
            .get(name)
            .ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
    }
}

fn guard_cycle<'r>(
    seen: &mut HashSet<&'r str>,
    current: &'r Ref,
    origin: &Ref,
) -> Result<(), ResolveError> {
    if seen.insert(current.as_str()) {
        Ok(())
    } else {
        Err(ResolveError::CircularRef(origin.to_string()))
    }
}

fn expect_kind(reference: &Ref, expected: ComponentKind) -> Result<&str, ResolveError> {
    let (kind, name) = reference.parts()?;
    if kind != expected {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected.as_str(),
            kind.as_str(),
            reference
        )));
    }
    Ok(name)
}
