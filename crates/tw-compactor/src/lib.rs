//! Context compactor: shrinks text before it is sent to an LLM.
//!
//! Strategies, applied in this order by [`compress`]:
//! 1. Whitespace normalization (lossless)
//! 2. Comment stripping
//! 3. Repeated-phrase folding (lossy, acronyms)
//! 4. Truncation to a character limit
//! 5. Aggressive line-sampling summary
//!
//! [`estimate`] predicts the achievable reduction without compressing, and
//! the [`composer`] profiles apply the pipeline per field for the two LLM
//! call sites.

pub mod comments;
pub mod composer;
pub mod estimator;
pub mod phrases;
pub mod pipeline;
pub mod summarize;
pub mod truncate;
pub mod whitespace;

pub use composer::{compose_analysis_context, compose_extraction_context, AnalysisContext, ExtractionContext};
pub use estimator::{estimate, CompressionEstimate};
pub use pipeline::{compress, CompressionOptions, CompressionResult, CompressionStrategy};

#[cfg(test)]
mod tests;
