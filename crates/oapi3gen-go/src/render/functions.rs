//! Functions exposed to every template.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use minijinja::value::{Rest, Value, ViaDeserialize};
use minijinja::{Environment, Error, ErrorKind, context};
use oapi3gen_core::Specification;
use oapi3gen_core::parse::content::Content;
use oapi3gen_core::parse::operation::Operation;
use oapi3gen_core::parse::parameter::Parameter;
use oapi3gen_core::parse::reference::Ref;
use oapi3gen_core::parse::response::Response;
use oapi3gen_core::parse::schema::Schema;
use oapi3gen_core::transform::{self, predicate};

use super::context::RenderContext;
use crate::strategy::Strategy;
use crate::type_mapper::schema_to_go;

type Spec = Arc<Specification>;

fn fail(err: impl fmt::Display) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}

/// Build a map from alternating keys and values:
/// `pairs("owner", schema, "context", "components")`.
pub fn pairs(args: Rest<Value>) -> Result<Value, Error> {
    if args.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("pairs expects key/value pairs, got {} arguments", args.len()),
        ));
    }
    let mut map = BTreeMap::new();
    for pair in args.chunks(2) {
        let key = pair[0].as_str().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("pairs keys must be strings, got {}", pair[0].kind()),
            )
        })?;
        map.insert(key.to_string(), pair[1].clone());
    }
    Ok(Value::from(map))
}

/// Whether a schema is rendered as a Go struct literal where it appears.
pub fn is_inline_object(schema: &Schema) -> bool {
    !schema.is_reference() && (predicate::struct_shaped(schema) || !schema.all_of.is_empty())
}

/// Properties of a schema (after `allOf` expansion) as template rows.
fn struct_fields(spec: &Specification, owner: &Schema) -> Result<Vec<Value>, Error> {
    let flat = transform::expand_all_of(&spec.resolver(), owner).map_err(fail)?;
    Ok(flat
        .properties
        .iter()
        .map(|(name, schema)| {
            context! {
                name => name,
                schema => schema,
                owner => &flat,
                optional => flat.is_field_optional(name),
            }
        })
        .collect())
}

/// Register the shared function set. Strategy-specific functions are added
/// afterwards and win on name clashes.
pub fn register(env: &mut Environment<'_>, spec: &Spec, strategy: &'static dyn Strategy) {
    register_references(env, spec);
    register_schemas(env, spec);
    register_operations(env);
    register_annotations(env, strategy);
    register_document(env, spec);

    env.add_function("pairs", pairs);
    env.add_function("to_camel", |name: String| transform::to_camel(&name));
    env.add_function("to_lower_camel", |name: String| transform::to_lower_camel(&name));
}

fn register_references(env: &mut Environment<'_>, spec: &Spec) {
    env.add_function("ref_type_name", |locator: String| {
        Ref::new(locator).type_name().map_err(fail)
    });

    let s = Arc::clone(spec);
    env.add_function("underlying_schema", move |locator: String| {
        s.resolver()
            .underlying_schema(&Ref::new(locator))
            .map(|schema| Value::from_serialize(&schema))
            .map_err(fail)
    });
}

fn register_schemas(env: &mut Environment<'_>, spec: &Spec) {
    let s = Arc::clone(spec);
    env.add_function("is_nilable", move |schema: ViaDeserialize<Schema>| {
        s.resolver().is_nilable(&schema).map_err(fail)
    });
    let s = Arc::clone(spec);
    env.add_function("is_omittable", move |schema: ViaDeserialize<Schema>| {
        s.resolver().is_omittable(&schema).map_err(fail)
    });
    let s = Arc::clone(spec);
    env.add_function("is_struct", move |schema: ViaDeserialize<Schema>| {
        s.resolver().is_struct(&schema).map_err(fail)
    });
    let s = Arc::clone(spec);
    env.add_function("expand_all_of", move |schema: ViaDeserialize<Schema>| {
        transform::expand_all_of(&s.resolver(), &schema)
            .map(|flat| Value::from_serialize(&flat))
            .map_err(fail)
    });
    let s = Arc::clone(spec);
    env.add_function("struct_fields", move |owner: ViaDeserialize<Schema>| {
        struct_fields(&s, &owner)
    });

    env.add_function("go_type", |schema: ViaDeserialize<Schema>| {
        schema_to_go(&schema).map_err(fail)
    });
    env.add_function("is_inline_object", |schema: ViaDeserialize<Schema>| {
        is_inline_object(&schema)
    });
    env.add_function(
        "is_field_optional",
        |owner: ViaDeserialize<Schema>, name: String| owner.is_field_optional(&name),
    );
}

fn register_operations(env: &mut Environment<'_>) {
    env.add_function("bindable_schema", |content: ViaDeserialize<Content>| {
        Value::from_serialize(content.bindable_schema().cloned().unwrap_or_default())
    });
    env.add_function("is_parametrized_content", |content: ViaDeserialize<Content>| {
        content.is_parametrized()
    });
    env.add_function("has_request_body", |op: ViaDeserialize<Operation>| {
        op.has_request_body()
    });
    env.add_function("has_bindable_body", |op: ViaDeserialize<Operation>| {
        op.has_bindable_body()
    });
    env.add_function("has_parametrized_body", |op: ViaDeserialize<Operation>| {
        op.has_parametrized_body()
    });
    env.add_function("is_empty_response", |response: ViaDeserialize<Response>| {
        response.is_empty()
    });
    env.add_function("is_inline_struct", |response: ViaDeserialize<Response>| {
        response.is_inline_struct()
    });
    env.add_function("is_all_empty_responses", |op: ViaDeserialize<Operation>| {
        op.is_all_empty_responses()
    });
    env.add_function("real_responses", |op: ViaDeserialize<Operation>| {
        op.real_responses()
            .into_iter()
            .map(|(code, response)| context! { code => code, response => response })
            .collect::<Vec<_>>()
    });
    env.add_function("status_patterns", |op: ViaDeserialize<Operation>| {
        op.status_patterns()
            .into_iter()
            .map(|(pattern, _)| pattern.to_string())
            .collect::<Vec<_>>()
    });
    env.add_function("default_status_code", |pattern: String| {
        transform::default_status_code(&pattern)
    });
    env.add_function(
        "operation_id",
        |path: String, method: String, op: ViaDeserialize<Operation>| {
            transform::operation_id(&path, &method, &op)
        },
    );
}

fn register_annotations(env: &mut Environment<'_>, strategy: &'static dyn Strategy) {
    env.add_function("is_parameter_required", |parameter: ViaDeserialize<Parameter>| {
        parameter.is_required()
    });
    env.add_function(
        "parameter_tags",
        move |parameter: ViaDeserialize<Parameter>| strategy.parameter_tags(&parameter).to_string(),
    );
    env.add_function(
        "field_tags",
        move |scope: Value,
              name: String,
              field: ViaDeserialize<Schema>,
              owner: ViaDeserialize<Schema>| {
            let scope = scope
                .downcast_object_ref::<RenderContext>()
                .ok_or_else(|| fail("field_tags expects the render scope as first argument"))?;
            Ok::<_, Error>(
                strategy
                    .field_tags(scope.fields(), &name, &field, &owner)
                    .to_string(),
            )
        },
    );
}

fn register_document(env: &mut Environment<'_>, spec: &Spec) {
    let s = Arc::clone(spec);
    env.add_function("package_name", move || s.package_name());
    let s = Arc::clone(spec);
    env.add_function("has_generic_error_response", move || {
        s.has_generic_error_response()
    });
    let s = Arc::clone(spec);
    env.add_function("middleware_names", move || s.middleware_names());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Backend;
    use oapi3gen_core::parse::schema::SchemaType;

    fn env_for(yaml: &str) -> Environment<'static> {
        let spec = Arc::new(oapi3gen_core::parse::from_yaml(yaml).unwrap());
        let mut env = Environment::new();
        register(&mut env, &spec, Backend::Default.strategy());
        env
    }

    const PETS: &str = r#"
openapi: 3.0.0
info: {title: Pets, version: 2.1.0}
paths: {}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: {type: integer}
    Pets:
      type: array
      items: {$ref: '#/components/schemas/Pet'}
"#;

    #[test]
    fn test_pairs_builds_a_map() {
        let env = env_for(PETS);
        let out = env
            .render_str("{% set p = pairs('a', 1, 'b', 'x') %}{{ p.a }}-{{ p.b }}", context! {})
            .unwrap();
        assert_eq!(out, "1-x");
    }

    #[test]
    fn test_pairs_rejects_odd_arguments() {
        let env = env_for(PETS);
        let err = env.render_str("{{ pairs('a', 1, 'b') }}", context! {}).unwrap_err();
        assert!(err.to_string().contains("key/value pairs"));
    }

    #[test]
    fn test_pairs_rejects_non_string_keys() {
        let env = env_for(PETS);
        let err = env.render_str("{{ pairs(1, 2) }}", context! {}).unwrap_err();
        assert!(err.to_string().contains("keys must be strings"));
    }

    #[test]
    fn test_reference_functions() {
        let env = env_for(PETS);
        let out = env
            .render_str(
                "{{ ref_type_name('#/components/schemas/Pet') }} {{ underlying_schema('#/components/schemas/Pets').type }}",
                context! {},
            )
            .unwrap();
        assert_eq!(out, "PetSchema array");
    }

    #[test]
    fn test_predicates_through_templates() {
        let env = env_for(PETS);
        let pets = Schema::reference("#/components/schemas/Pets");
        let pet = Schema::reference("#/components/schemas/Pet");
        let out = env
            .render_str(
                "{{ is_nilable(pets) }} {{ is_struct(pet) }} {{ is_omittable(pet) }} {{ go_type(pets) }}",
                context! { pets => pets, pet => pet },
            )
            .unwrap();
        assert_eq!(out, "true true false PetSchema");
    }

    #[test]
    fn test_resolution_errors_fail_rendering() {
        let env = env_for(PETS);
        let missing = Schema::reference("#/components/schemas/Missing");
        let err = env
            .render_str("{{ is_nilable(s) }}", context! { s => missing })
            .unwrap_err();
        assert!(err.to_string().contains("#/components/schemas/Missing"));
    }

    #[test]
    fn test_document_functions() {
        let env = env_for(PETS);
        let out = env
            .render_str(
                "{{ package_name() }} {{ has_generic_error_response() }} {{ middleware_names()|length }}",
                context! {},
            )
            .unwrap();
        assert_eq!(out, "v2 false 0");
    }

    #[test]
    fn test_field_tags_follow_the_scope() {
        let env = env_for(PETS);
        let owner = Schema {
            required: vec!["id".into()],
            ..Schema::of_type(SchemaType::Object)
        };
        let field = Schema::of_type(SchemaType::String);
        let out = env
            .render_str(
                "{{ field_tags(scope, 'tag', f, o) }} {{ field_tags(scope.with_fields('requestBody'), 'tag', f, o) }}",
                context! { scope => Value::from_object(RenderContext::new()), f => field, o => owner },
            )
            .unwrap();
        assert_eq!(out, "`json:\"tag,omitempty\"` `json:\"tag\"`");
    }

    #[test]
    fn test_field_tags_need_the_scope() {
        let env = env_for(PETS);
        let field = Schema::of_type(SchemaType::String);
        let err = env
            .render_str(
                "{{ field_tags('components', 'x', f, f) }}",
                context! { f => field },
            )
            .unwrap_err();
        assert!(err.to_string().contains("render scope"));
    }

    #[test]
    fn test_bindable_schema_keeps_document_order() {
        let env = env_for(PETS);
        let content = Content::new()
            .with("multipart/form-data", Schema::reference("#/components/schemas/Form"))
            .with("application/json", Schema::reference("#/components/schemas/Json"));
        assert_eq!(
            content.bindable_schema().map(|s| s.reference.as_str()),
            Some("#/components/schemas/Form")
        );
        let out = env
            .render_str("{{ go_type(bindable_schema(c)) }}", context! { c => content })
            .unwrap();
        assert_eq!(out, "FormSchema");
    }

    #[test]
    fn test_inline_objects() {
        assert!(is_inline_object(&Schema::of_type(SchemaType::Object)));
        assert!(!is_inline_object(&Schema::reference("#/components/schemas/Pet")));
        let composed = Schema {
            all_of: vec![Schema::reference("#/components/schemas/Pet")],
            ..Schema::default()
        };
        assert!(is_inline_object(&composed));
    }
}
