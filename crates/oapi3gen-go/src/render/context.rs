use std::sync::Arc;

use minijinja::value::{Object, Value, from_args};
use minijinja::{Error, ErrorKind, State};

use crate::tags::FieldContext;

/// Per-run rendering state handed to templates as `scope`.
///
/// Immutable: templates derive updated copies through `with_*` methods, so
/// nothing leaks between sections or between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    omitting_fields: bool,
    fields: FieldContext,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            omitting_fields: false,
            fields: FieldContext::Components,
        }
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether optional fields are left out of the output (`omitempty`)
    /// rather than pointer-wrapped.
    pub fn omitting_fields(&self) -> bool {
        self.omitting_fields
    }

    /// Where the struct fields being rendered are declared.
    pub fn fields(&self) -> FieldContext {
        self.fields
    }

    pub fn with_omitting_fields(&self, omitting_fields: bool) -> Self {
        Self {
            omitting_fields,
            ..*self
        }
    }

    pub fn with_fields(&self, fields: FieldContext) -> Self {
        Self { fields, ..*self }
    }
}

impl Object for RenderContext {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "omitting_fields" => Some(Value::from(self.omitting_fields)),
            "fields" => Some(Value::from(self.fields.as_str())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "with_omitting_fields" => {
                let (flag,): (bool,) = from_args(args)?;
                Ok(Value::from_object(self.with_omitting_fields(flag)))
            }
            "with_fields" => {
                let (name, body_required): (String, Option<bool>) = from_args(args)?;
                let fields = FieldContext::from_name(&name, body_required.unwrap_or(false))
                    .ok_or_else(|| {
                        Error::new(
                            ErrorKind::InvalidOperation,
                            format!("unknown field context '{name}'"),
                        )
                    })?;
                Ok(Value::from_object(self.with_fields(fields)))
            }
            _ => Err(Error::from(ErrorKind::UnknownMethod)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::{Environment, context};

    fn scope() -> Value {
        Value::from_object(RenderContext::new())
    }

    #[test]
    fn test_updates_return_new_values() {
        let base = RenderContext::new();
        let omitting = base.with_omitting_fields(true);
        assert!(!base.omitting_fields());
        assert!(omitting.omitting_fields());
        assert_eq!(omitting.fields(), FieldContext::Components);
    }

    #[test]
    fn test_template_access() {
        let env = Environment::new();
        let out = env
            .render_str(
                "{{ scope.omitting_fields }} {% set c = scope.with_omitting_fields(true) %}{{ c.omitting_fields }} {{ scope.omitting_fields }}",
                context! { scope => scope() },
            )
            .unwrap();
        assert_eq!(out, "false true false");
    }

    #[test]
    fn test_field_context_switch() {
        let env = Environment::new();
        let out = env
            .render_str(
                "{{ scope.fields }} {{ scope.with_fields('requestBody', true).fields }}",
                context! { scope => scope() },
            )
            .unwrap();
        assert_eq!(out, "components requestBody");
    }

    #[test]
    fn test_unknown_field_context_fails() {
        let env = Environment::new();
        let err = env
            .render_str("{{ scope.with_fields('headers') }}", context! { scope => scope() })
            .unwrap_err();
        assert!(err.to_string().contains("unknown field context"));
    }

    #[test]
    fn test_unknown_method_fails() {
        let env = Environment::new();
        let result = env.render_str("{{ scope.reset() }}", context! { scope => scope() });
        assert!(result.is_err());
    }
}
