//! Chat-markup templates for the supported instruction-tuned models.

use gradebench_core::error::{PromptError, Result};

/// Priming suffix appended after the assistant-turn opening when a boxed
/// math answer is expected immediately.
pub const BOXED_PRIMER: &str = "The final answer is: $\\boxed{";

/// Chat-markup family of an instruction-tuned model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupFamily {
    Phi35,
    Llama3,
    Mistral,
}

impl MarkupFamily {
    /// Resolve the markup family for a model identifier.
    ///
    /// Matching is substring-based so that minor-version variants (e.g.
    /// Mistral v0.1 vs v0.3) land on the same template. An identifier that
    /// matches no family is a hard error; silently defaulting here would
    /// feed a model a foreign chat template.
    pub fn detect(model: &str) -> Result<Self> {
        if model.contains("Phi-3.5") {
            Ok(Self::Phi35)
        } else if model.contains("Llama-3") {
            Ok(Self::Llama3)
        } else if model.contains("Mistral") {
            Ok(Self::Mistral)
        } else {
            Err(PromptError::ModelMismatch {
                model: model.to_string(),
            }
            .into())
        }
    }

    /// Tokens opening the user turn.
    pub fn opening(&self) -> &'static str {
        match self {
            Self::Phi35 => "<|user|>",
            Self::Llama3 => "<|begin_of_text|><|start_header_id|>user<|end_header_id|>",
            Self::Mistral => "[INST]",
        }
    }

    /// Tokens closing the user turn and opening the assistant turn.
    pub fn closing(&self) -> &'static str {
        match self {
            Self::Phi35 => "<|end|><|assistant|>",
            Self::Llama3 => "<|eot_id|><|start_header_id|>assistant<|end_header_id|>",
            Self::Mistral => "[/INST]",
        }
    }

    /// Wrap a prompt in this family's chat markup.
    pub fn wrap(&self, prompt: &str) -> String {
        format!("{}{}{}", self.opening(), prompt, self.closing())
    }

    /// Wrap a prompt and prime the assistant turn to open a boxed answer.
    pub fn wrap_boxed(&self, prompt: &str) -> String {
        format!("{}{}{}{}", self.opening(), prompt, self.closing(), BOXED_PRIMER)
    }
}
