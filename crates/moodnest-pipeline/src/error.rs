use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input rejected before any side effect
    #[error("{0}")]
    Validation(String),

    #[error("Missing pipeline component: {0}")]
    MissingComponent(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn message_required() -> Self {
        PipelineError::Validation("Message is required".to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
