use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Model identifiers the harness knows how to prompt.
pub const SUPPORTED_MODELS: [&str; 3] = [
    "Phi-3.5-Mini-Instruct",
    "Llama-3.1-8B-Instruct",
    "Mistral-7B-Instruct-v0.1",
];

/// Prompt encoding format.
///
/// `Qa` belongs to the older few-shot configuration space and still parses,
/// but the instruct-style evaluators reject it at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    Instruct,
    Normal,
    Qa,
}

impl EncodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instruct => "instruct",
            Self::Normal => "normal",
            Self::Qa => "qa",
        }
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, ConfigError> {
        match s {
            "instruct" => Ok(Self::Instruct),
            "normal" => Ok(Self::Normal),
            "qa" => Ok(Self::Qa),
            other => Err(ConfigError::UnknownEncodeFormat(other.to_string())),
        }
    }
}

/// Decoding strategy used to elicit an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoding {
    /// Unconstrained standard prompt.
    Standard,
    /// Forced no-reasoning direct answer.
    DirectAnswer,
    /// Explicit chain-of-thought.
    Cot,
}

impl Decoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::DirectAnswer => "direct_answer",
            Self::Cot => "cot",
        }
    }
}

impl fmt::Display for Decoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, ConfigError> {
        match s {
            "standard" => Ok(Self::Standard),
            "direct_answer" => Ok(Self::DirectAnswer),
            "cot" => Ok(Self::Cot),
            other => Err(ConfigError::UnknownDecoding(other.to_string())),
        }
    }
}

/// Immutable evaluator configuration, validated when parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub encode_format: EncodeFormat,
    pub decoding: Decoding,
    /// One of [`SUPPORTED_MODELS`].
    pub model: String,
    /// Dataset label; only the numeric evaluator sets this.
    #[serde(default)]
    pub data_file: Option<String>,
}

impl EvalConfig {
    /// Parse caller-supplied settings, rejecting anything outside the
    /// enumerated sets.
    pub fn parse(encode_format: &str, decoding: &str, model: &str) -> Result<Self> {
        let encode_format: EncodeFormat = encode_format.parse()?;
        let decoding: Decoding = decoding.parse()?;
        if !SUPPORTED_MODELS.contains(&model) {
            return Err(ConfigError::UnknownModel(model.to_string()).into());
        }
        Ok(Self {
            encode_format,
            decoding,
            model: model.to_string(),
            data_file: None,
        })
    }

    pub fn with_data_file(mut self, data_file: impl Into<String>) -> Self {
        self.data_file = Some(data_file.into());
        self
    }

    /// Whether the configured dataset is a MATH-style (boxed answer) set.
    pub fn is_math(&self) -> bool {
        self.data_file.as_deref().is_some_and(|f| f.contains("MATH"))
    }
}
