use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::literal;
use super::reference::Ref;

/// A JSON Schema `type` keyword value. Anything unrecognised is kept verbatim
/// so it can surface as an unknown type in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Other(String),
}

impl SchemaType {
    pub fn as_str(&self) -> &str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Other(s) => s,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SchemaType::Object)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SchemaType::Array)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SchemaType::Number | SchemaType::Integer)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            SchemaType::String | SchemaType::Number | SchemaType::Integer | SchemaType::Boolean
        )
    }
}

impl From<String> for SchemaType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            _ => SchemaType::Other(s),
        }
    }
}

impl From<SchemaType> for String {
    fn from(t: SchemaType) -> Self {
        t.as_str().to_string()
    }
}

/// `additionalProperties` can be a boolean or a schema. Either way its
/// presence turns the node into an open map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

fn is_unset(r: &Ref) -> bool {
    !r.is_set()
}

/// A schema node: either a bare reference or an inline shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "is_unset")]
    pub reference: Ref,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    /// Parsed for completeness; composition logic only consumes `allOf`.
    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Numeric constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    // Length constraints
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    #[serde(
        rename = "default",
        default,
        deserialize_with = "literal::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    #[serde(
        rename = "enum",
        default,
        deserialize_with = "literal::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enum_values: Vec<String>,

    /// Required property names of this node only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

impl Schema {
    /// A reference-only node.
    pub fn reference(locator: impl Into<String>) -> Self {
        Self {
            reference: Ref::new(locator),
            ..Self::default()
        }
    }

    /// An inline node of the given type.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Whether the node carries anything meaningful.
    pub fn is_set(&self) -> bool {
        self.reference.is_set()
            || !self.all_of.is_empty()
            || !self.any_of.is_empty()
            || self
                .schema_type
                .as_ref()
                .is_some_and(|t| !t.as_str().is_empty())
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_set()
    }

    pub fn is_numeric(&self) -> bool {
        self.schema_type.as_ref().is_some_and(SchemaType::is_numeric)
    }

    pub fn is_array(&self) -> bool {
        self.schema_type.as_ref().is_some_and(SchemaType::is_array)
    }

    pub fn is_object(&self) -> bool {
        self.schema_type.as_ref().is_some_and(SchemaType::is_object)
    }

    pub fn is_primitive(&self) -> bool {
        self.schema_type.as_ref().is_some_and(SchemaType::is_primitive)
    }

    pub fn is_open_map(&self) -> bool {
        self.additional_properties.is_some()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Whether `field` is absent from this node's `required` list.
    pub fn is_field_optional(&self, field: &str) -> bool {
        !self.required.iter().any(|r| r == field)
    }
}
