//! Evaluator for multiple-choice question sets with single-letter answers.

use gradebench_core::config::{Decoding, EncodeFormat, EvalConfig};
use gradebench_core::error::Result;
use gradebench_core::example::Example;

use crate::evaluator::{AnswerEvaluator, validated_config};
use crate::extract::{self, Extraction};
use crate::template::MarkupFamily;

/// Evaluator for multiple-choice questions answered with a letter A-E.
#[derive(Debug, Clone)]
pub struct ChoiceEvaluator {
    config: EvalConfig,
}

impl ChoiceEvaluator {
    /// Build an evaluator, failing fast on any setting outside its
    /// enumerated set.
    pub fn new(encode_format: &str, decoding: &str, model: &str) -> Result<Self> {
        let config = validated_config(encode_format, decoding, model)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn base_prompt(&self, question: &str) -> String {
        match self.config.decoding {
            Decoding::Standard => format!("{question}\n\n"),
            Decoding::DirectAnswer => format!(
                "{question}\n\nYour answer must not include any reasoning. \
                 You must write your answer directly. Write the answer in the \
                 following format: \"Answer: <Your Answer Letter Choice>\"\n"
            ),
            Decoding::Cot => format!("{question}\n\nLet's think step by step.\n"),
        }
    }
}

impl AnswerEvaluator for ChoiceEvaluator {
    fn encode_prompt(&self, example: &Example) -> Result<String> {
        let family = MarkupFamily::detect(&self.config.model)?;
        Ok(family.wrap(&self.base_prompt(&example.question)))
    }

    fn extract_model_answer(&self, completion: &str) -> Extraction {
        // Unreachable under the accepted encode formats; inherited from a
        // wider few-shot configuration space.
        let completion = if self.config.encode_format == EncodeFormat::Qa {
            extract::strip_qa_continuation(completion)
        } else {
            completion
        };
        extract::choice_answer(completion, self.config.decoding)
    }
}
