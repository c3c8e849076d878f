pub mod config;
pub mod error;
pub mod parse;
pub mod transform;

pub use error::{ParseError, ResolveError};
pub use parse::ref_resolve::RefResolver;
pub use parse::spec::Specification;
