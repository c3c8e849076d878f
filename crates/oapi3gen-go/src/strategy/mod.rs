pub mod echo;

use minijinja::Environment;
use oapi3gen_core::parse::parameter::Parameter;
use oapi3gen_core::parse::schema::Schema;

use crate::tags::{FieldContext, Tag, TagSet};

pub use echo::EchoStrategy;

/// Server flavour policy: which template to render, which struct tags to
/// emit and which extra template functions to expose.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Name of the entry template.
    fn template(&self) -> &'static str;

    /// Register functions only this flavour's templates use.
    fn register_functions(&self, _env: &mut Environment<'_>) {}

    fn parameter_tags(&self, parameter: &Parameter) -> TagSet;

    fn field_tags(&self, context: FieldContext, name: &str, field: &Schema, owner: &Schema)
    -> TagSet;
}

/// Plain `net/http` output: JSON keys only, parameters untagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl Strategy for DefaultStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn template(&self) -> &'static str {
        "base.go.j2"
    }

    fn parameter_tags(&self, _parameter: &Parameter) -> TagSet {
        TagSet::new()
    }

    fn field_tags(
        &self,
        context: FieldContext,
        name: &str,
        _field: &Schema,
        owner: &Schema,
    ) -> TagSet {
        let omit = context == FieldContext::Components && owner.is_field_optional(name);
        let mut tags = TagSet::new();
        tags.push(Tag::new(
            "json",
            if omit {
                format!("{name},omitempty")
            } else {
                name.to_string()
            },
        ));
        tags
    }
}

static DEFAULT: DefaultStrategy = DefaultStrategy;
static ECHO: EchoStrategy = EchoStrategy;

/// The closed set of strategies, picked once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Default,
    Echo,
}

impl Backend {
    /// `echo` selects the echo flavour; anything else, including the empty
    /// string, selects the default one.
    pub fn from_name(name: &str) -> Self {
        match name {
            "echo" => Backend::Echo,
            "" | "default" => Backend::Default,
            other => {
                log::warn!("unknown server '{other}', using the default strategy");
                Backend::Default
            }
        }
    }

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Backend::Default => &DEFAULT,
            Backend::Echo => &ECHO,
        }
    }
}
