use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("code generation failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("code formatting failed: {0}")]
    Format(#[source] std::io::Error),
}
