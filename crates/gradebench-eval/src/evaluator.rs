use gradebench_core::config::{EncodeFormat, EvalConfig};
use gradebench_core::error::{ConfigError, Result};
use gradebench_core::example::Example;

use crate::extract::{Extraction, INVALID_ANS};

/// Encode formats the instruct-style evaluators accept.
const ACCEPTED_FORMATS: [EncodeFormat; 2] = [EncodeFormat::Instruct, EncodeFormat::Normal];

/// Parse and validate constructor arguments shared by both evaluators.
pub(crate) fn validated_config(
    encode_format: &str,
    decoding: &str,
    model: &str,
) -> Result<EvalConfig> {
    let config = EvalConfig::parse(encode_format, decoding, model)?;
    if !ACCEPTED_FORMATS.contains(&config.encode_format) {
        return Err(
            ConfigError::UnsupportedEncodeFormat(config.encode_format.to_string()).into(),
        );
    }
    Ok(config)
}

/// Common contract for answer evaluators, so the caller can pick one per
/// dataset type behind `dyn AnswerEvaluator`.
pub trait AnswerEvaluator: Send + Sync {
    /// Format the full model prompt for one example.
    fn encode_prompt(&self, example: &Example) -> Result<String>;

    /// Extract the ground-truth answer from a labeled example.
    ///
    /// Labels arrive pre-stripped from the dataset loader, so this is an
    /// identity passthrough. The marker-stripping rule it once applied is
    /// kept here in case raw labels ever come back:
    /// `#### (\-?[0-9\.\,]+)`, commas removed from the captured value.
    fn extract_gt_answer<'a>(&self, example: &'a Example) -> &'a str {
        &example.answer
    }

    /// Locate a candidate answer in raw model output.
    fn extract_model_answer(&self, completion: &str) -> Extraction;

    /// Exact string comparison of a candidate answer against the ground
    /// truth. No numeric normalization, no whitespace trimming.
    ///
    /// # Panics
    ///
    /// Panics if the ground truth is the invalid sentinel. A missing label
    /// is a data-pipeline defect upstream and must halt rather than count
    /// as a wrong model answer.
    fn is_correct(&self, example: &Example, model_answer: &str) -> bool {
        let gt_answer = self.extract_gt_answer(example);
        assert_ne!(
            gt_answer, INVALID_ANS,
            "missing ground truth for example {:?}",
            example.id
        );
        model_answer == gt_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebench_core::error::GradebenchError;

    struct FixedEvaluator;

    impl AnswerEvaluator for FixedEvaluator {
        fn encode_prompt(&self, example: &Example) -> Result<String> {
            Ok(example.question.clone())
        }

        fn extract_model_answer(&self, _completion: &str) -> Extraction {
            Extraction::Invalid
        }
    }

    #[test]
    fn validated_config_accepts_instruct_and_normal() {
        for format in ["instruct", "normal"] {
            validated_config(format, "cot", "Phi-3.5-Mini-Instruct").unwrap();
        }
    }

    #[test]
    fn validated_config_rejects_qa() {
        let err = validated_config("qa", "cot", "Phi-3.5-Mini-Instruct").unwrap_err();
        assert!(matches!(
            err,
            GradebenchError::Config(ConfigError::UnsupportedEncodeFormat(_))
        ));
    }

    #[test]
    fn is_correct_exact_equality() {
        let ex = Example::new("q", "42");
        assert!(FixedEvaluator.is_correct(&ex, "42"));
        assert!(!FixedEvaluator.is_correct(&ex, "43"));
    }

    #[test]
    fn is_correct_is_whitespace_sensitive() {
        let ex = Example::new("q", "42");
        assert!(!FixedEvaluator.is_correct(&ex, "42 "));
        assert!(!FixedEvaluator.is_correct(&ex, " 42"));
    }

    #[test]
    fn is_correct_is_case_sensitive() {
        let ex = Example::new("q", "B");
        assert!(!FixedEvaluator.is_correct(&ex, "b"));
    }

    #[test]
    #[should_panic(expected = "missing ground truth")]
    fn is_correct_panics_on_missing_ground_truth() {
        let ex = Example::new("q", INVALID_ANS);
        FixedEvaluator.is_correct(&ex, "42");
    }

    #[test]
    fn gt_extraction_is_identity() {
        let ex = Example::new("q", "#### 42");
        // Identity passthrough: the marker survives untouched.
        assert_eq!(FixedEvaluator.extract_gt_answer(&ex), "#### 42");
    }
}
