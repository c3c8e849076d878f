pub mod error;
pub mod generator;
pub mod render;
pub mod strategy;
pub mod tags;
pub mod type_mapper;

pub use error::GenerateError;
pub use generator::{GenerateOptions, SourceFormatter, Unformatted, generate};
pub use strategy::{Backend, Strategy};
