//! Compression pipeline: runs the strategies in fixed order.

use crate::{comments, phrases, summarize, truncate, whitespace};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SUMMARY_LENGTH: usize = 50;

/// Per-call compression options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOptions {
    /// Enables the line-sampling summary.
    pub aggressive: bool,
    /// Keeps interior space runs (alignment, tables).
    pub preserve_formatting: bool,
    pub max_length_chars: Option<usize>,
    /// Line budget for the aggressive summary.
    pub summary_length: usize,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            aggressive: false,
            preserve_formatting: false,
            max_length_chars: None,
            summary_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

impl CompressionOptions {
    pub fn conservative() -> Self {
        Self::default()
    }

    pub fn aggressive() -> Self {
        Self { aggressive: true, ..Self::default() }
    }

    pub fn preserving() -> Self {
        Self { preserve_formatting: true, ..Self::default() }
    }

    pub fn with_max_length(mut self, max_chars: usize) -> Self {
        self.max_length_chars = Some(max_chars);
        self
    }

    pub fn with_summary_length(mut self, lines: usize) -> Self {
        self.summary_length = lines;
        self
    }
}

/// One text transform of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionStrategy {
    Whitespace,
    Comments,
    RepeatedContent,
    Truncation,
    AggressiveSummary,
}

impl CompressionStrategy {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comments => "comments",
            Self::RepeatedContent => "repeated-content",
            Self::Truncation => "truncation",
            Self::AggressiveSummary => "aggressive-summary",
        }
    }
}

/// Joins strategy tags with `+`.
pub fn join_tags(strategies: &[CompressionStrategy]) -> String {
    strategies.iter().map(|s| s.as_tag()).collect::<Vec<_>>().join("+")
}

/// Compression result with statistics. Lengths are in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub original: String,
    pub compressed: String,
    pub original_length: usize,
    pub compressed_length: usize,
    pub reduction_percent: f64,
    /// Strategies that changed the text, in application order.
    pub strategies: Vec<CompressionStrategy>,
}

impl CompressionResult {
    /// `+`-joined tags of the strategies that fired; empty if none did.
    pub fn compression_type(&self) -> String {
        join_tags(&self.strategies)
    }

    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 1.0;
        }
        self.compressed_length as f64 / self.original_length as f64
    }

    pub fn is_unchanged(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Rough token savings at 4 characters per token.
    pub fn estimated_tokens_saved(&self) -> usize {
        self.original_length.saturating_sub(self.compressed_length) / 4
    }
}

/// `100 × (1 − new/original)`, 0 for empty originals.
pub fn reduction_percent(original_len: usize, compressed_len: usize) -> f64 {
    if original_len == 0 {
        return 0.0;
    }
    (1.0 - compressed_len as f64 / original_len as f64) * 100.0
}

fn apply(
    text: &mut String,
    applied: &mut Vec<CompressionStrategy>,
    strategy: CompressionStrategy,
    f: impl FnOnce(&str) -> String,
) {
    let next = f(text.as_str());
    if next != *text {
        *text = next;
        applied.push(strategy);
    }
}

/// Run the pipeline over `text`.
pub fn compress(text: &str, options: &CompressionOptions) -> CompressionResult {
    let mut result = text.to_string();
    let mut strategies = Vec::new();

    apply(&mut result, &mut strategies, CompressionStrategy::Whitespace, |t| {
        whitespace::normalize(t, options.preserve_formatting)
    });
    apply(&mut result, &mut strategies, CompressionStrategy::Comments, comments::strip);
    apply(&mut result, &mut strategies, CompressionStrategy::RepeatedContent, phrases::fold);

    if let Some(max_chars) = options.max_length_chars {
        apply(&mut result, &mut strategies, CompressionStrategy::Truncation, |t| {
            truncate::truncate(t, max_chars)
        });
    }

    if options.aggressive {
        apply(&mut result, &mut strategies, CompressionStrategy::AggressiveSummary, |t| {
            summarize::summarize(t, options.summary_length)
        });
    }

    let original_length = text.chars().count();
    let compressed_length = result.chars().count();
    let reduction = reduction_percent(original_length, compressed_length);
    debug!(
        original_length,
        compressed_length,
        reduction_percent = reduction,
        strategies = %join_tags(&strategies),
        "compressed context"
    );

    CompressionResult {
        original: text.to_string(),
        compressed: result,
        original_length,
        compressed_length,
        reduction_percent: reduction,
        strategies,
    }
}
