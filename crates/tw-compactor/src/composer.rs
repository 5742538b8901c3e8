//! Per-call-site compression profiles.

use crate::pipeline::{compress, reduction_percent, CompressionOptions, CompressionResult};
use tracing::debug;

pub const EXTRACTION_DOCUMENT_MAX_CHARS: usize = 5000;
pub const EXTRACTION_DOCUMENT_SUMMARY_LINES: usize = 100;
pub const ANALYSIS_FACTS_MAX_CHARS: usize = 8000;
pub const ANALYSIS_QUERIES_MAX_CHARS: usize = 4000;

/// Document body: aggressive, 100-line summary, 5000-char cap.
pub fn extraction_document_options() -> CompressionOptions {
    CompressionOptions::aggressive()
        .with_summary_length(EXTRACTION_DOCUMENT_SUMMARY_LINES)
        .with_max_length(EXTRACTION_DOCUMENT_MAX_CHARS)
}

/// Instructions and hypotheses: near-verbatim.
pub fn verbatim_options() -> CompressionOptions {
    CompressionOptions::preserving()
}

pub fn analysis_facts_options() -> CompressionOptions {
    CompressionOptions::conservative().with_max_length(ANALYSIS_FACTS_MAX_CHARS)
}

pub fn analysis_queries_options() -> CompressionOptions {
    CompressionOptions::aggressive().with_max_length(ANALYSIS_QUERIES_MAX_CHARS)
}

fn total_reduction(parts: &[&CompressionResult]) -> f64 {
    let original: usize = parts.iter().map(|r| r.original_length).sum();
    let compressed: usize = parts.iter().map(|r| r.compressed_length).sum();
    reduction_percent(original, compressed)
}

/// Context for a document-extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    pub document: CompressionResult,
    pub instructions: CompressionResult,
    /// Over both fields combined.
    pub reduction: f64,
}

pub fn compose_extraction_context(document: &str, instructions: &str) -> ExtractionContext {
    let document = compress(document, &extraction_document_options());
    let instructions = compress(instructions, &verbatim_options());
    let reduction = total_reduction(&[&document, &instructions]);
    debug!(reduction, "composed extraction context");
    ExtractionContext { document, instructions, reduction }
}

/// Context for a fact/hypothesis/query analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub facts: CompressionResult,
    pub hypotheses: CompressionResult,
    pub queries: CompressionResult,
    pub reduction: f64,
}

pub fn compose_analysis_context(facts: &str, hypotheses: &str, queries: &str) -> AnalysisContext {
    let facts = compress(facts, &analysis_facts_options());
    let hypotheses = compress(hypotheses, &verbatim_options());
    let queries = compress(queries, &analysis_queries_options());
    let reduction = total_reduction(&[&facts, &hypotheses, &queries]);
    debug!(reduction, "composed analysis context");
    AnalysisContext { facts, hypotheses, queries, reduction }
}
