use serde::{Deserialize, Serialize};

use super::content::Content;
use super::reference::Ref;

/// A response definition, either a bare reference or inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "$ref", default)]
    pub reference: Ref,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: Content,
}

impl Response {
    pub fn reference(locator: impl Into<String>) -> Self {
        Self {
            reference: Ref::new(locator),
            ..Self::default()
        }
    }

    pub fn with_content(content: Content) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    /// No reference and no bindable schema with a shape.
    pub fn is_empty(&self) -> bool {
        !self.reference.is_set() && !self.content.has_bindable_schema()
    }

    /// Whether the response body is an anonymous object that needs its own
    /// generated type.
    pub fn is_inline_struct(&self) -> bool {
        if self.reference.is_set() {
            return false;
        }
        match self.content.bindable_schema() {
            Some(schema) => {
                !schema.reference.is_set() && schema.is_object() && !schema.is_open_map()
            }
            None => false,
        }
    }
}
