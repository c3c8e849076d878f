pub mod context;
pub mod functions;

use std::sync::Arc;

use minijinja::value::Value;
use minijinja::{Environment, context};
use oapi3gen_core::Specification;

use crate::error::GenerateError;
use crate::strategy::Backend;

pub use context::RenderContext;

const TEMPLATES: &[(&str, &str)] = &[
    ("macros.go.j2", include_str!("../../templates/macros.go.j2")),
    ("struct.go.j2", include_str!("../../templates/struct.go.j2")),
    ("base.go.j2", include_str!("../../templates/base.go.j2")),
    ("echo.go.j2", include_str!("../../templates/echo.go.j2")),
];

fn environment(spec: &Arc<Specification>, backend: Backend) -> Result<Environment<'static>, GenerateError> {
    let strategy = backend.strategy();
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    functions::register(&mut env, spec, strategy);
    strategy.register_functions(&mut env);
    Ok(env)
}

/// Render the Go source for `spec` with the given backend. The output is not
/// formatted.
pub fn render(spec: &Specification, backend: Backend) -> Result<String, GenerateError> {
    let spec = Arc::new(spec.clone());
    let env = environment(&spec, backend)?;
    let template = env.get_template(backend.strategy().template())?;

    let operations = spec.operations();
    log::debug!(
        "rendering {} with {} operations",
        backend.strategy().template(),
        operations.len()
    );

    let source = template.render(context! {
        spec => &*spec,
        operations => operations,
        scope => Value::from_object(RenderContext::new()),
    })?;
    Ok(source)
}
