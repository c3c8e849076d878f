use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Locator of the response every operation may fall back to.
pub const GENERIC_ERROR_REF: &str = "#/components/responses/Error";

const COMPONENTS_PREFIX: &str = "#/components/";

/// The component namespace a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Responses,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Responses => "responses",
        }
    }

    fn type_suffix(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "Schema",
            ComponentKind::Responses => "Response",
        }
    }
}

/// A `$ref` locator. The empty string means "no reference".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ref(String);

impl Ref {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn is_generic_error(&self) -> bool {
        self.0 == GENERIC_ERROR_REF
    }

    /// Split `#/components/<kind>/<name>` into its kind and name.
    pub fn parts(&self) -> Result<(ComponentKind, &str), ResolveError> {
        let invalid = || ResolveError::InvalidRefFormat(self.0.clone());
        let stripped = self.0.strip_prefix(COMPONENTS_PREFIX).ok_or_else(invalid)?;
        let (section, name) = stripped.split_once('/').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }
        let kind = match section {
            "schemas" => ComponentKind::Schemas,
            "responses" => ComponentKind::Responses,
            _ => return Err(invalid()),
        };
        Ok((kind, name))
    }

    pub fn name(&self) -> Result<&str, ResolveError> {
        self.parts().map(|(_, name)| name)
    }

    /// Name of the generated type: `<Name>Schema` or `<Name>Response`.
    pub fn type_name(&self) -> Result<String, ResolveError> {
        let (kind, name) = self.parts()?;
        Ok(format!("{name}{}", kind.type_suffix()))
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ref {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}
