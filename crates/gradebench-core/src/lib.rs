pub mod config;
pub mod error;
pub mod example;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{Decoding, EncodeFormat, EvalConfig, SUPPORTED_MODELS};
    pub use crate::error::{ConfigError, GradebenchError, PromptError, Result};
    pub use crate::example::Example;
}
