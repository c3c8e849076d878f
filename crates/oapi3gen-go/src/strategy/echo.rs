use minijinja::Environment;
use oapi3gen_core::parse::parameter::Parameter;
use oapi3gen_core::parse::schema::Schema;
use oapi3gen_core::transform::default_status_code;

use super::Strategy;
use crate::tags::{FieldContext, TagSet, build_field_tags, build_parameter_tags};

/// [labstack/echo](https://echo.labstack.com) handlers: bind tags, defaults,
/// `validate` rules and a `RegisterHandlers` function.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoStrategy;

/// `/pets/{id}` → `/pets/:id`.
pub fn to_column_parameters_path(path: &str) -> String {
    path.replace('{', ":").replace('}', "")
}

impl Strategy for EchoStrategy {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn template(&self) -> &'static str {
        "echo.go.j2"
    }

    fn register_functions(&self, env: &mut Environment<'_>) {
        env.add_function("to_column_parameters_path", |path: String| {
            to_column_parameters_path(&path)
        });
        env.add_function("to_upper", |value: String| value.to_uppercase());
        env.add_function("default_status_code", |pattern: String| {
            default_status_code(&pattern)
        });
    }

    fn parameter_tags(&self, parameter: &Parameter) -> TagSet {
        build_parameter_tags(parameter)
    }

    fn field_tags(
        &self,
        context: FieldContext,
        name: &str,
        field: &Schema,
        owner: &Schema,
    ) -> TagSet {
        build_field_tags(context, name, field, owner)
    }
}
