//! Cheap pre-flight estimate of achievable reduction.

use crate::pipeline::CompressionStrategy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const WHITESPACE_POINTS: u32 = 7;
const COMMENT_POINTS: u32 = 10;
const REPETITION_POINTS: u32 = 3;
const LONG_TEXT_POINTS: u32 = 20;
const MAX_ESTIMATE: u32 = 40;

const REPEATED_WORD_THRESHOLD: usize = 5;
const LONG_TEXT_CHARS: usize = 5000;

static RE_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}|\n{3,}|[ \t]+\n").unwrap());
static RE_COMMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)<!--|/\*|(^|[^:])//|^[ \t]*#[^# ]|(^|[ \t])--[ \t]").unwrap());

/// Predicted reduction (percent) and the strategies expected to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionEstimate {
    pub estimated_reduction: u32,
    pub strategies: Vec<CompressionStrategy>,
}

impl CompressionEstimate {
    pub fn worth_compressing(&self, min_reduction: u32) -> bool {
        self.estimated_reduction >= min_reduction
    }
}

fn has_repeated_word(text: &str) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        let n = counts.entry(word).or_insert(0);
        *n += 1;
        if *n > REPEATED_WORD_THRESHOLD {
            return true;
        }
    }
    false
}

/// Heuristic only; never touches the text.
pub fn estimate(text: &str) -> CompressionEstimate {
    let mut points = 0;
    let mut strategies = Vec::new();

    if RE_WHITESPACE_RUN.is_match(text) {
        points += WHITESPACE_POINTS;
        strategies.push(CompressionStrategy::Whitespace);
    }
    if RE_COMMENT_MARKER.is_match(text) {
        points += COMMENT_POINTS;
        strategies.push(CompressionStrategy::Comments);
    }
    if has_repeated_word(text) {
        points += REPETITION_POINTS;
        strategies.push(CompressionStrategy::RepeatedContent);
    }
    if text.chars().count() > LONG_TEXT_CHARS {
        points += LONG_TEXT_POINTS;
        strategies.push(CompressionStrategy::AggressiveSummary);
    }

    CompressionEstimate {
        estimated_reduction: points.min(MAX_ESTIMATE),
        strategies,
    }
}
