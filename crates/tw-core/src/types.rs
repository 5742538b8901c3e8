use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of LLM call a cached result belongs to.
///
/// The four well-known kinds have dedicated variants; anything else is kept
/// verbatim as `Custom`. Serialized as its kebab-case label. Equality and
/// hashing go by label, so `Custom("classification")` equals `Classification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    FactExtraction,
    Classification,
    QueryGeneration,
    HypothesisGeneration,
    Custom(String),
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FactExtraction => "fact-extraction",
            Self::Classification => "classification",
            Self::QueryGeneration => "query-generation",
            Self::HypothesisGeneration => "hypothesis-generation",
            Self::Custom(s) => s,
        }
    }

    /// The task types cached by default.
    pub fn defaults() -> Vec<TaskType> {
        vec![
            Self::FactExtraction,
            Self::Classification,
            Self::QueryGeneration,
            Self::HypothesisGeneration,
        ]
    }
}

impl PartialEq for TaskType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TaskType {}

impl Hash for TaskType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        match s {
            "fact-extraction" => Self::FactExtraction,
            "classification" => Self::Classification,
            "query-generation" => Self::QueryGeneration,
            "hypothesis-generation" => Self::HypothesisGeneration,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TaskType> for String {
    fn from(t: TaskType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token accounting reported by the LLM backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

/// Output of one LLM call, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    pub content: String,
    pub model: String,
    pub tokens: TokenUsage,
}

impl LlmResult {
    pub fn new(content: impl Into<String>, model: impl Into<String>, input: u64, output: u64) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            tokens: TokenUsage { input, output },
        }
    }
}
