//! Evaluator for free-form numeric and MATH-style boxed answers.

use gradebench_core::config::{Decoding, EncodeFormat, EvalConfig};
use gradebench_core::error::Result;
use gradebench_core::example::Example;

use crate::evaluator::{AnswerEvaluator, validated_config};
use crate::extract::{self, Extraction};
use crate::template::MarkupFamily;

/// Evaluator for numeric question sets. A `data_file` label containing
/// `MATH` switches prompting and extraction to the boxed-answer style.
#[derive(Debug, Clone)]
pub struct NumericEvaluator {
    config: EvalConfig,
}

impl NumericEvaluator {
    /// Build an evaluator, failing fast on any setting outside its
    /// enumerated set.
    pub fn new(encode_format: &str, decoding: &str, data_file: &str, model: &str) -> Result<Self> {
        let config = validated_config(encode_format, decoding, model)?.with_data_file(data_file);
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn base_prompt(&self, question: &str) -> String {
        match self.config.decoding {
            Decoding::Standard => format!("{question}\n\n"),
            Decoding::DirectAnswer if self.config.is_math() => format!(
                "{question}\n\nYour answer must not include any reasoning step. \
                 You must only write your answer directly.\n"
            ),
            Decoding::DirectAnswer => format!(
                "{question}\n\nYour answer must not include any reasoning step. \
                 You must only write your numerical answer directly. You only output \
                 \"The answer is <answer>\" where <answer> is the numerical answer \
                 to the problem.\n"
            ),
            // Single space after the blank line, unlike the choice prompt.
            Decoding::Cot => format!("{question}\n\n Let's think step by step.\n"),
        }
    }
}

impl AnswerEvaluator for NumericEvaluator {
    fn encode_prompt(&self, example: &Example) -> Result<String> {
        let family = MarkupFamily::detect(&self.config.model)?;
        let prompt = self.base_prompt(&example.question);
        if self.config.is_math() && self.config.decoding == Decoding::DirectAnswer {
            Ok(family.wrap_boxed(&prompt))
        } else {
            Ok(family.wrap(&prompt))
        }
    }

    fn extract_model_answer(&self, completion: &str) -> Extraction {
        // Unreachable under the accepted encode formats; inherited from a
        // wider few-shot configuration space.
        let completion = if self.config.encode_format == EncodeFormat::Qa {
            extract::strip_qa_continuation(completion)
        } else {
            completion
        };
        if self.config.is_math() {
            extract::last_boxed(completion)
        } else {
            extract::numeric_answer(completion, self.config.decoding)
        }
    }
}
