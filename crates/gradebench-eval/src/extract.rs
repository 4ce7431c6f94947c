//! Pure scanning routines that recover a candidate answer from raw model
//! output. Failure to find an answer is a value, not an error; only the
//! config and template layers produce hard errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use gradebench_core::config::Decoding;

/// Legacy sentinel for "no answer found"; ground-truth labels must never
/// equal this.
pub const INVALID_ANS: &str = "[invalid]";

/// Signed numeric token: starts with a digit or minus sign, may contain
/// digits, commas and periods, ends in a digit; or a single lone digit.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-0-9][0-9,.]*[0-9]|[0-9]").unwrap());

/// `\boxed{...}` with up to one level of nested balanced braces inside.
static BOXED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\boxed\{([^{}]+(?:\{[^{}]*\}[^{}]*)*)\}").unwrap());

/// Single uppercase choice letter.
static LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-E]").unwrap());

/// Result of scanning model text for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extraction {
    /// A located answer with the half-open byte span it was found at.
    Answer {
        value: String,
        start: usize,
        end: usize,
    },
    /// No answer could be located.
    Invalid,
}

impl Extraction {
    /// The extracted answer text, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Answer { value, .. } => Some(value),
            Self::Invalid => None,
        }
    }

    /// Half-open byte span of the match within the source text.
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::Answer { start, end, .. } => Some((*start, *end)),
            Self::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    fn from_match(m: regex::Match<'_>) -> Self {
        Self::Answer {
            value: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        }
    }
}

/// Keep only the text before the first few-shot continuation marker.
pub fn strip_qa_continuation(completion: &str) -> &str {
    match completion.find("\nQ: ") {
        Some(idx) => &completion[..idx],
        None => completion,
    }
}

/// Last `\boxed{...}` expression in the completion.
///
/// The value is the brace content (nested braces preserved); the span covers
/// the whole `\boxed{...}` expression.
pub fn last_boxed(completion: &str) -> Extraction {
    let last = BOXED_RE.captures_iter(completion).last();
    match last {
        Some(caps) => match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(inner)) => Extraction::Answer {
                value: inner.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            },
            _ => {
                tracing::warn!("malformed boxed capture state");
                Extraction::Invalid
            }
        },
        None => {
            tracing::warn!("no boxed answer found in completion");
            Extraction::Invalid
        }
    }
}

/// Numeric token selected by decoding strategy: direct-answer prompts put
/// the answer first, reasoning prompts put it last.
pub fn numeric_answer(completion: &str, decoding: Decoding) -> Extraction {
    let matches: Vec<regex::Match<'_>> = NUMBER_RE.find_iter(completion).collect();
    let picked = match decoding {
        Decoding::DirectAnswer => matches.first(),
        Decoding::Standard | Decoding::Cot => matches.last(),
    };
    match picked {
        Some(m) => Extraction::from_match(*m),
        None => Extraction::Invalid,
    }
}

/// Choice letter selected by decoding strategy.
///
/// Direct-answer prompts request the literal form `Answer: <Letter>`, so when
/// the completion echoes "Answer" the letter of interest is the second match
/// (the 'A' of "Answer" is the first). A missing second match means the
/// model ignored the format; that is an extraction failure, not an error.
pub fn choice_answer(completion: &str, decoding: Decoding) -> Extraction {
    let matches: Vec<regex::Match<'_>> = LETTER_RE.find_iter(completion).collect();
    if matches.is_empty() {
        return Extraction::Invalid;
    }
    let picked = match decoding {
        Decoding::DirectAnswer => {
            let idx = if completion.contains("Answer") { 1 } else { 0 };
            matches.get(idx)
        }
        Decoding::Standard | Decoding::Cot => matches.last(),
    };
    match picked {
        Some(m) => Extraction::from_match(*m),
        None => Extraction::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Extraction accessors ---

    #[test]
    fn extraction_accessors() {
        let found = Extraction::Answer {
            value: "42".into(),
            start: 3,
            end: 5,
        };
        assert_eq!(found.value(), Some("42"));
        assert_eq!(found.span(), Some((3, 5)));
        assert!(!found.is_invalid());

        assert_eq!(Extraction::Invalid.value(), None);
        assert_eq!(Extraction::Invalid.span(), None);
        assert!(Extraction::Invalid.is_invalid());
    }

    #[test]
    fn extraction_serde() {
        let found = Extraction::Answer {
            value: "B".into(),
            start: 0,
            end: 1,
        };
        let json = serde_json::to_string(&found).unwrap();
        assert!(json.contains("\"answer\""));
        let back: Extraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, found);
    }

    // --- strip_qa_continuation ---

    #[test]
    fn strip_qa_keeps_prefix() {
        let text = "The answer is 7.\nQ: What about 8?\nA: 8";
        assert_eq!(strip_qa_continuation(text), "The answer is 7.");
    }

    #[test]
    fn strip_qa_without_marker() {
        assert_eq!(strip_qa_continuation("no marker here"), "no marker here");
    }

    // --- last_boxed ---

    #[test]
    fn boxed_last_occurrence_with_nesting() {
        let text = r"We get \boxed{3} and \boxed{\frac{1}{2}} in the end.";
        let result = last_boxed(text);
        assert_eq!(result.value(), Some(r"\frac{1}{2}"));
        let (start, end) = result.span().unwrap();
        assert_eq!(&text[start..end], r"\boxed{\frac{1}{2}}");
    }

    #[test]
    fn boxed_simple() {
        let result = last_boxed(r"The final answer is: $\boxed{42}$.");
        assert_eq!(result.value(), Some("42"));
    }

    #[test]
    fn boxed_none() {
        let result = last_boxed("no boxes anywhere");
        assert!(result.is_invalid());
        assert_eq!(result.span(), None);
    }

    #[test]
    fn boxed_empty_braces_not_matched() {
        assert!(last_boxed(r"\boxed{}").is_invalid());
    }

    // --- numeric_answer ---

    #[test]
    fn numeric_cot_takes_last() {
        let result = numeric_answer("first 12, then 34.", Decoding::Cot);
        assert_eq!(result.value(), Some("34"));
        let (start, end) = result.span().unwrap();
        assert_eq!(&"first 12, then 34."[start..end], "34");
    }

    #[test]
    fn numeric_direct_answer_takes_first() {
        let result = numeric_answer("first 12, then 34.", Decoding::DirectAnswer);
        assert_eq!(result.value(), Some("12"));
    }

    #[test]
    fn numeric_standard_takes_last() {
        let result = numeric_answer("from 5 we reach 9", Decoding::Standard);
        assert_eq!(result.value(), Some("9"));
    }

    #[test]
    fn numeric_signed_and_separators() {
        let result = numeric_answer("balance: -1,234.56 dollars", Decoding::Cot);
        assert_eq!(result.value(), Some("-1,234.56"));
    }

    #[test]
    fn numeric_lone_digit() {
        let result = numeric_answer("the answer is 7", Decoding::Cot);
        assert_eq!(result.value(), Some("7"));
    }

    #[test]
    fn numeric_none() {
        let result = numeric_answer("no digits at all", Decoding::Cot);
        assert!(result.is_invalid());
        assert_eq!(result.span(), None);
    }

    // --- choice_answer ---

    #[test]
    fn choice_cot_takes_last() {
        let result = choice_answer("maybe C, but on reflection D.", Decoding::Cot);
        assert_eq!(result.value(), Some("D"));
    }

    #[test]
    fn choice_standard_takes_last() {
        let result = choice_answer("A then B", Decoding::Standard);
        assert_eq!(result.value(), Some("B"));
    }

    #[test]
    fn choice_direct_answer_second_match_after_answer_echo() {
        // "Answer" itself contributes the first 'A' match; the letter that
        // follows is the model's pick.
        let text = "Answer: B";
        let result = choice_answer(text, Decoding::DirectAnswer);
        assert_eq!(result.value(), Some("B"));
        let (start, end) = result.span().unwrap();
        assert_eq!(&text[start..end], "B");
    }

    #[test]
    fn choice_direct_answer_index_one_even_if_not_the_format_letter() {
        // Index-1 selection is positional: a stray letter between the echo
        // and the pick wins. Mirrors the historical selection rule.
        let result = choice_answer("Answer Choice: B", Decoding::DirectAnswer);
        assert_eq!(result.value(), Some("C"));
    }

    #[test]
    fn choice_direct_answer_first_match_without_answer_echo() {
        let result = choice_answer("B sounds right, or D", Decoding::DirectAnswer);
        assert_eq!(result.value(), Some("B"));
    }

    #[test]
    fn choice_direct_answer_missing_second_match_is_invalid() {
        // "Answer" appears but only a single letter match exists (its own
        // 'A'): index 1 is out of range and converts to Invalid.
        let result = choice_answer("Answer: 4", Decoding::DirectAnswer);
        assert!(result.is_invalid());
        assert_eq!(result.span(), None);
    }

    #[test]
    fn choice_none() {
        let result = choice_answer("no letters here", Decoding::Cot);
        assert!(result.is_invalid());
    }
}
