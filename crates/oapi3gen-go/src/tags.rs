//! Go struct tags carrying serialization keys, defaults and validation rules.

use std::fmt;

use oapi3gen_core::parse::parameter::{Parameter, ParameterLocation};
use oapi3gen_core::parse::schema::Schema;

/// Where a field is declared. Decides the serialization key and which
/// directives apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldContext {
    /// A property of a component schema or a response object.
    Components,
    /// A field of an operation's parameter struct.
    Parameters,
    /// A property of a request body. Fields are only required when the body
    /// itself is.
    RequestBody { body_required: bool },
}

impl FieldContext {
    /// Parse the context name used in templates.
    pub fn from_name(name: &str, body_required: bool) -> Option<Self> {
        match name {
            "components" => Some(FieldContext::Components),
            "parameters" => Some(FieldContext::Parameters),
            "requestBody" => Some(FieldContext::RequestBody { body_required }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldContext::Components => "components",
            FieldContext::Parameters => "parameters",
            FieldContext::RequestBody { .. } => "requestBody",
        }
    }

    /// Whether `name` must be present in `owner`.
    pub fn is_field_required(&self, name: &str, owner: &Schema) -> bool {
        let listed = !owner.is_field_optional(name);
        match self {
            FieldContext::Components | FieldContext::Parameters => listed,
            FieldContext::RequestBody { body_required } => listed && *body_required,
        }
    }
}

/// One `key:"value"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: &'static str,
    pub value: String,
}

impl Tag {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// An ordered struct tag. Renders as a backquoted, space-separated list, or
/// as nothing when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

impl Extend<Tag> for TagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("`")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:\"{}\"", tag.key, tag.value)?;
        }
        f.write_str("`")
    }
}

/// Tags for a struct field.
///
/// Component fields carry their JSON key, with `omitempty` when the owner
/// does not require them. Request-body fields carry a form key followed by
/// the default and validation directives. Parameter-struct fields get their
/// tags from [`build_parameter_tags`] instead and yield nothing here.
pub fn build_field_tags(context: FieldContext, name: &str, field: &Schema, owner: &Schema) -> TagSet {
    let mut tags = TagSet::new();
    match context {
        FieldContext::Components => {
            let omit = if owner.is_field_optional(name) {
                ",omitempty"
            } else {
                ""
            };
            tags.push(Tag::new("json", format!("{name}{omit}")));
        }
        FieldContext::RequestBody { .. } => {
            tags.push(Tag::new("form", name));
            tags.extend(input_directives(field, context.is_field_required(name, owner)));
        }
        FieldContext::Parameters => {}
    }
    tags
}

/// Tags for a parameter-struct field: the binding key for path and query
/// parameters, then the default and validation directives.
pub fn build_parameter_tags(parameter: &Parameter) -> TagSet {
    let mut tags = TagSet::new();
    match parameter.location {
        ParameterLocation::Path => tags.push(Tag::new("param", parameter.name.as_str())),
        ParameterLocation::Query => tags.push(Tag::new("query", parameter.name.as_str())),
        ParameterLocation::Header | ParameterLocation::Cookie => {}
    }
    tags.extend(input_directives(&parameter.schema, parameter.is_required()));
    tags
}

/// `default` and `validate` directives for a value read from a request.
fn input_directives(schema: &Schema, required: bool) -> Vec<Tag> {
    let mut tags = Vec::new();
    if let Some(default) = &schema.default_value {
        tags.push(Tag::new("default", default.as_str()));
    }

    let mut rules = Vec::new();
    if required {
        rules.push("required".to_string());
    }
    if !schema.enum_values.is_empty() {
        rules.push(format!("oneof={}", schema.enum_values.join(" ")));
    }
    let (min, max) = if schema.is_numeric() {
        (
            schema.minimum.map(|v| v.to_string()),
            schema.maximum.map(|v| v.to_string()),
        )
    } else {
        (
            schema.min_length.map(|v| v.to_string()),
            schema.max_length.map(|v| v.to_string()),
        )
    };
    if let Some(min) = min {
        rules.push(format!("min={min}"));
    }
    if let Some(max) = max {
        rules.push(format!("max={max}"));
    }
    if !rules.is_empty() {
        tags.push(Tag::new("validate", rules.join(",")));
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use oapi3gen_core::parse::schema::SchemaType;

    fn owner(required: &[&str]) -> Schema {
        Schema {
            required: required.iter().map(|s| s.to_string()).collect(),
            ..Schema::of_type(SchemaType::Object)
        }
    }

    fn bounded_integer() -> Schema {
        Schema {
            minimum: Some(1.0),
            maximum: Some(100.0),
            min_length: Some(3),
            default_value: Some("10".into()),
            ..Schema::of_type(SchemaType::Integer)
        }
    }

    #[test]
    fn test_component_fields() {
        let pet = owner(&["id"]);
        let id = Schema::of_type(SchemaType::Integer);
        assert_snapshot!(
            build_field_tags(FieldContext::Components, "id", &id, &pet).to_string(),
            @r#"`json:"id"`"#
        );
        assert_snapshot!(
            build_field_tags(FieldContext::Components, "tag", &id, &pet).to_string(),
            @r#"`json:"tag,omitempty"`"#
        );
    }

    #[test]
    fn test_component_fields_skip_directives() {
        let tags = build_field_tags(FieldContext::Components, "limit", &bounded_integer(), &owner(&[]));
        assert!(tags.get("validate").is_none());
        assert!(tags.get("default").is_none());
    }

    #[test]
    fn test_request_body_fields() {
        let body = owner(&["limit"]);
        let required_body = FieldContext::RequestBody { body_required: true };
        assert_snapshot!(
            build_field_tags(required_body, "limit", &bounded_integer(), &body).to_string(),
            @r#"`form:"limit" default:"10" validate:"required,min=1,max=100"`"#
        );

        let optional_body = FieldContext::RequestBody { body_required: false };
        assert_snapshot!(
            build_field_tags(optional_body, "limit", &bounded_integer(), &body).to_string(),
            @r#"`form:"limit" default:"10" validate:"min=1,max=100"`"#
        );
    }

    #[test]
    fn test_string_bounds_and_enum() {
        let sort = Schema {
            enum_values: vec!["asc".into(), "desc".into()],
            min_length: Some(3),
            max_length: Some(4),
            minimum: Some(0.0),
            ..Schema::of_type(SchemaType::String)
        };
        let mut param = Parameter::new("sort", ParameterLocation::Query, sort);
        param.required = true;
        assert_snapshot!(
            build_parameter_tags(&param).to_string(),
            @r#"`query:"sort" validate:"required,oneof=asc desc,min=3,max=4"`"#
        );
    }

    #[test]
    fn test_fractional_numeric_bounds() {
        let ratio = Schema {
            minimum: Some(0.5),
            maximum: Some(1.0),
            ..Schema::of_type(SchemaType::Number)
        };
        let param = Parameter::new("ratio", ParameterLocation::Query, ratio);
        assert_snapshot!(
            build_parameter_tags(&param).to_string(),
            @r#"`query:"ratio" validate:"min=0.5,max=1"`"#
        );
    }

    #[test]
    fn test_path_parameters_are_required() {
        let param = Parameter::new("id", ParameterLocation::Path, Schema::of_type(SchemaType::Integer));
        assert_snapshot!(
            build_parameter_tags(&param).to_string(),
            @r#"`param:"id" validate:"required"`"#
        );
    }

    #[test]
    fn test_header_parameters_have_no_key() {
        let param = Parameter::new("X-Trace", ParameterLocation::Header, Schema::of_type(SchemaType::String));
        assert!(build_parameter_tags(&param).is_empty());
        assert_eq!(build_parameter_tags(&param).to_string(), "");
    }

    #[test]
    fn test_parameter_context_fields_have_no_tags() {
        let tags = build_field_tags(
            FieldContext::Parameters,
            "x",
            &Schema::of_type(SchemaType::String),
            &owner(&["x"]),
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn test_requiredness_grows_with_required_list() {
        let contexts = [
            FieldContext::Components,
            FieldContext::RequestBody { body_required: true },
            FieldContext::RequestBody { body_required: false },
        ];
        for context in contexts {
            let before = context.is_field_required("name", &owner(&["id"]));
            let after = context.is_field_required("name", &owner(&["id", "name"]));
            assert!(!before || after);
        }
        assert!(!FieldContext::RequestBody { body_required: false }
            .is_field_required("name", &owner(&["name"])));
    }

    #[test]
    fn test_context_names() {
        assert_eq!(FieldContext::from_name("components", false), Some(FieldContext::Components));
        assert_eq!(
            FieldContext::from_name("requestBody", true),
            Some(FieldContext::RequestBody { body_required: true })
        );
        assert_eq!(FieldContext::from_name("headers", false), None);
        assert_eq!(FieldContext::Parameters.as_str(), "parameters");
    }
}
