use thiserror::Error;

/// Top-level error type for the Gradebench library.
#[derive(Debug, Error)]
pub enum GradebenchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Construction-time validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown encode format: '{0}'")]
    UnknownEncodeFormat(String),

    #[error("Unknown decoding strategy: '{0}'")]
    UnknownDecoding(String),

    #[error("Unsupported model: '{0}'")]
    UnknownModel(String),

    #[error("Encode format '{0}' is not accepted by this evaluator")]
    UnsupportedEncodeFormat(String),
}

/// Prompt-encoding failures.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Model name mismatch: no chat markup family matches '{model}'")]
    ModelMismatch { model: String },
}

pub type Result<T> = std::result::Result<T, GradebenchError>;
