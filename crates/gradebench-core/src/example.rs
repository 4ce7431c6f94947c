use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single labeled question, as supplied by an external dataset loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Optional identifier from the source dataset.
    #[serde(default)]
    pub id: Option<String>,
    /// The question text.
    pub question: String,
    /// Ground-truth answer label or numeric string.
    pub answer: String,
    /// Additional metadata (tags, category, difficulty, etc.)
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Example {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer: answer.into(),
            metadata: HashMap::new(),
        }
    }
}
