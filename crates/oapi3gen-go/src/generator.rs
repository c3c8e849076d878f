use std::io;

use oapi3gen_core::Specification;

use crate::error::GenerateError;
use crate::render;
use crate::strategy::Backend;

/// Post-processing step applied to the rendered source, usually `gofmt`.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> io::Result<String>;
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
    fn format(&self, source: &str) -> io::Result<String> {
        Ok(source.to_string())
    }
}

/// Per-run generation switches.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Strategy name; unknown names select the default strategy.
    pub server: String,
    /// Return the raw template output without calling the formatter.
    pub debug: bool,
}

/// Generate one Go source file for `spec`.
pub fn generate(
    spec: &Specification,
    options: &GenerateOptions,
    formatter: &dyn SourceFormatter,
) -> Result<String, GenerateError> {
    let backend = Backend::from_name(&options.server);
    log::info!("generating Go code with the {} strategy", backend.strategy().name());

    let source = render::render(spec, backend)?;
    if options.debug {
        log::debug!("debug mode: skipping formatter");
        return Ok(source);
    }
    formatter.format(&source).map_err(GenerateError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl SourceFormatter for Failing {
        fn format(&self, _source: &str) -> io::Result<String> {
            Err(io::Error::other("1:1: expected 'package'"))
        }
    }

    fn spec() -> Specification {
        oapi3gen_core::parse::from_yaml("openapi: 3.0.0\ninfo: {title: t, version: 1.0.0}\npaths: {}\n")
            .unwrap()
    }

    #[test]
    fn test_formatter_errors_are_fatal() {
        let err = generate(&spec(), &GenerateOptions::default(), &Failing).unwrap_err();
        assert!(err.to_string().starts_with("code formatting failed"));
    }

    #[test]
    fn test_debug_skips_formatter() {
        let options = GenerateOptions {
            debug: true,
            ..GenerateOptions::default()
        };
        let out = generate(&spec(), &options, &Failing).unwrap();
        assert!(out.starts_with("package v1"));
    }
}
