use crate::*;
use crate::comments;
use crate::composer::*;
use crate::phrases;
use crate::pipeline::*;
use crate::summarize;
use crate::truncate::{self, TRUNCATION_MARKER};
use crate::whitespace;

fn numbered_lines(n: usize) -> String {
    (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
}

// ========== Whitespace ==========

#[test]
fn test_ws_trailing() {
    assert_eq!(whitespace::normalize("line1   \nline2\t\n", false), "line1\nline2");
}

#[test]
fn test_ws_blank_lines() {
    assert_eq!(whitespace::normalize("a\n\n\n\n\nb", false), "a\n\nb");
    assert_eq!(whitespace::normalize("a\n\nb", false), "a\n\nb");
}

#[test]
fn test_ws_interior_spaces() {
    assert_eq!(whitespace::normalize("a  b   c", false), "a b c");
}

#[test]
fn test_ws_keeps_indentation() {
    assert_eq!(
        whitespace::normalize("first\n    indented  text", false),
        "first\n    indented text"
    );
}

#[test]
fn test_ws_preserve_formatting() {
    let table = "name    value\nalpha   1";
    assert_eq!(whitespace::normalize(table, true), table);
}

#[test]
fn test_ws_trims_whole_text() {
    assert_eq!(whitespace::normalize("\n\n  body  \n\n", false), "body");
}

#[test]
fn test_ws_empty() {
    assert_eq!(whitespace::normalize("", false), "");
}

// ========== Comments ==========

#[test]
fn test_comments_html() {
    assert_eq!(comments::strip("<!-- note -->Body"), "Body");
    assert_eq!(comments::strip("A<!-- multi\nline -->B"), "AB");
}

#[test]
fn test_comments_c_block() {
    assert_eq!(comments::strip("code /* block */ more"), "code  more");
}

#[test]
fn test_comments_c_line() {
    assert_eq!(comments::strip("let x = 1; // set x"), "let x = 1; ");
    assert_eq!(comments::strip("// whole line\nkeep"), "\nkeep");
}

#[test]
fn test_comments_keep_urls() {
    let text = "see https://example.com/page for details";
    assert_eq!(comments::strip(text), text);
}

#[test]
fn test_comments_sql() {
    let result = comments::strip("SELECT 1 -- pick one\nFROM t");
    assert!(result.contains("SELECT 1"));
    assert!(!result.contains("pick"));
    assert!(result.contains("FROM t"));
}

#[test]
fn test_comments_hash_keeps_headers() {
    assert_eq!(comments::strip("# Title\n# comment\nbody"), "# Title\n# comment\nbody");
    assert_eq!(comments::strip("# Title\n#comment\nbody"), "# Title\nbody");
    assert_eq!(comments::strip("## Section\n#!/bin/bash\nx"), "## Section\nx");
}

#[test]
fn test_comments_is_hash_comment() {
    assert!(comments::is_hash_comment("  #todo"));
    assert!(!comments::is_hash_comment("### Heading"));
    assert!(!comments::is_hash_comment("not # a comment"));
}

#[test]
fn test_comments_plain_text_unchanged() {
    let text = "Revenue grew - and margins held.";
    assert_eq!(comments::strip(text), text);
}

// ========== Repeated phrases ==========

#[test]
fn test_phrases_acronym() {
    assert_eq!(phrases::acronym("quarterly revenue growth"), "QR");
    assert_eq!(phrases::acronym("ébitda margin trend"), "ÉM");
}

#[test]
fn test_phrases_discovery_order() {
    let text = "the annual recurring revenue rose. the annual recurring revenue fell. the annual recurring revenue held.";
    let found = phrases::repeated_phrases(text);
    assert_eq!(found[0], "the annual recurring");
    assert_eq!(found[1], "annual recurring revenue");
    // The first fold consumes the second phrase
    assert_eq!(phrases::fold(text), "TA revenue rose. TA revenue fell. TA revenue held.");
}

#[test]
fn test_phrases_short_phrase_ignored() {
    let text = "a b c a b c a b c";
    assert_eq!(phrases::fold(text), text);
}

#[test]
fn test_phrases_two_occurrences_ignored() {
    let text = "material adverse change here and material adverse change there";
    assert_eq!(phrases::fold(text), text);
}

#[test]
fn test_phrases_counts() {
    let counts = phrases::count_phrases("x y z x y z");
    assert_eq!(counts[0], ("x y z".to_string(), 2));
    assert_eq!(counts.len(), 3);
}

// ========== Truncation ==========

#[test]
fn test_truncate_hard_cut() {
    let text = "a".repeat(5000);
    let result = truncate::truncate(&text, 1000);
    assert_eq!(result.chars().count(), 1000);
    assert!(result.ends_with(TRUNCATION_MARKER));
}

#[test]
fn test_truncate_at_sentence_boundary() {
    let text = format!("{}.{}", "x".repeat(900), "y".repeat(500));
    let result = truncate::truncate(&text, 1000);
    assert!(result.ends_with(&format!(".{TRUNCATION_MARKER}")));
    assert!(!result.contains('y'));
}

#[test]
fn test_truncate_boundary_too_early() {
    let text = format!("{}.{}", "x".repeat(100), "y".repeat(2000));
    let result = truncate::truncate(&text, 1000);
    assert!(result.contains('y'));
    assert!(result.chars().count() <= 1000);
}

#[test]
fn test_truncate_under_limit() {
    assert_eq!(truncate::truncate("short", 1000), "short");
}

#[test]
fn test_truncate_tiny_limit() {
    assert_eq!(truncate::truncate("abcdefghij", 5), "abcde");
    let at_marker = TRUNCATION_MARKER.chars().count();
    let cut = truncate::truncate(&"z".repeat(100), at_marker);
    assert_eq!(cut, "z".repeat(at_marker));
    assert!(!cut.contains("[...truncated]"));
}

#[test]
fn test_truncate_multibyte() {
    let text = "é".repeat(3000);
    let result = truncate::truncate(&text, 100);
    assert!(result.chars().count() <= 100);
}

// ========== Summary ==========

#[test]
fn test_summary_samples_middle() {
    let text = numbered_lines(100);
    let result = summarize::summarize(&text, 60);
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines.len(), 60);
    assert_eq!(lines[0], "line 0");
    assert_eq!(lines[19], "line 19");
    assert_eq!(lines[20], "line 20");
    assert_eq!(lines[21], "line 23");
    assert_eq!(*lines.last().unwrap(), "line 99");
}

#[test]
fn test_summary_head_tail_exceed_budget() {
    let result = summarize::summarize(&numbered_lines(200), 50);
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[0], "line 0");
    assert_eq!(lines[40], "line 160");
}

#[test]
fn test_summary_short_text_unchanged() {
    let text = numbered_lines(10);
    assert_eq!(summarize::summarize(&text, 50), text);
}

// ========== Pipeline ==========

#[test]
fn test_pipeline_clean_text_unchanged() {
    let text = "Revenue grew by ten percent this quarter.";
    let r = compress(text, &CompressionOptions::default().with_max_length(1000));
    assert_eq!(r.compressed, text);
    assert_eq!(r.compression_type(), "");
    assert!(r.is_unchanged());
    assert_eq!(r.reduction_percent, 0.0);
}

#[test]
fn test_pipeline_whitespace_then_comments() {
    let text = "Summary  text   here\n\n\n\n<!-- hidden -->\nEnd";
    let r = compress(text, &CompressionOptions::default());
    assert_eq!(r.compression_type(), "whitespace+comments");
    assert!(!r.compressed.contains("hidden"));
}

#[test]
fn test_pipeline_repeated_content() {
    let text = "the annual recurring revenue rose.  the annual recurring revenue fell. the annual recurring revenue held.";
    let r = compress(text, &CompressionOptions::default());
    assert_eq!(r.compression_type(), "whitespace+repeated-content");
    assert_eq!(r.compressed, "TA revenue rose. TA revenue fell. TA revenue held.");
}

#[test]
fn test_pipeline_truncation() {
    let text = "a".repeat(5000);
    let r = compress(&text, &CompressionOptions::default().with_max_length(1000));
    assert!(r.compressed_length <= 1000);
    assert!(r.compressed.contains(TRUNCATION_MARKER.trim()));
    assert_eq!(r.compression_type(), "truncation");
    assert!((r.reduction_percent - 80.0).abs() < 1e-9);
}

#[test]
fn test_pipeline_aggressive_summary() {
    let text = numbered_lines(300);
    let r = compress(&text, &CompressionOptions::aggressive().with_summary_length(40));
    assert_eq!(r.compression_type(), "aggressive-summary");
    assert_eq!(r.compressed.lines().count(), 40);
}

#[test]
fn test_pipeline_aggressive_off_keeps_lines() {
    let text = numbered_lines(300);
    let r = compress(&text, &CompressionOptions::conservative());
    assert_eq!(r.compressed, text);
}

#[test]
fn test_pipeline_reduction_percent() {
    let r = compress("a  b", &CompressionOptions::default());
    assert_eq!(r.compressed, "a b");
    assert!((r.reduction_percent - 25.0).abs() < 1e-9);
    assert!((r.ratio() - 0.75).abs() < 1e-9);
}

#[test]
fn test_pipeline_empty() {
    let r = compress("", &CompressionOptions::aggressive().with_max_length(10));
    assert_eq!(r.compressed, "");
    assert_eq!(r.reduction_percent, 0.0);
    assert!(r.strategies.is_empty());
}

#[test]
fn test_pipeline_tokens_saved() {
    let text = "a".repeat(5000);
    let r = compress(&text, &CompressionOptions::default().with_max_length(1000));
    assert_eq!(r.estimated_tokens_saved(), 1000);
}

#[test]
fn test_options_serde() {
    let opts: CompressionOptions = serde_json::from_str(
        r#"{"aggressive":true,"preserve_formatting":false,"max_length_chars":4000,"summary_length":20}"#,
    )
    .unwrap();
    assert_eq!(opts, CompressionOptions::aggressive().with_max_length(4000).with_summary_length(20));
}

// ========== Estimator ==========

#[test]
fn test_estimate_clean() {
    let e = estimate("Revenue grew by ten percent.");
    assert_eq!(e.estimated_reduction, 0);
    assert!(e.strategies.is_empty());
}

#[test]
fn test_estimate_whitespace() {
    let e = estimate("a  b");
    assert_eq!(e.estimated_reduction, 7);
    assert_eq!(e.strategies, vec![CompressionStrategy::Whitespace]);
}

#[test]
fn test_estimate_comments() {
    assert_eq!(estimate("x // y").estimated_reduction, 10);
    assert_eq!(estimate("see https://example.com").estimated_reduction, 0);
}

#[test]
fn test_estimate_trailing_sql_comment() {
    let text = "SELECT id FROM facts -- newest first";
    assert_eq!(estimate(text).strategies, vec![CompressionStrategy::Comments]);
    assert_eq!(comments::strip(text).trim_end(), "SELECT id FROM facts");
}

#[test]
fn test_estimate_repeated_word() {
    assert_eq!(estimate("go go go go go go").estimated_reduction, 3);
    assert_eq!(estimate("go go go go go").estimated_reduction, 0);
}

#[test]
fn test_estimate_long_text() {
    let e = estimate(&"x".repeat(6000));
    assert_eq!(e.estimated_reduction, 20);
    assert_eq!(e.strategies, vec![CompressionStrategy::AggressiveSummary]);
}

#[test]
fn test_estimate_cap() {
    let text = "x  // go go go go go go\n\n\n\n".repeat(500);
    let e = estimate(&text);
    assert!(e.estimated_reduction <= 40);
    assert_eq!(e.strategies.len(), 4);
    assert!(e.worth_compressing(30));
}

// ========== Composers ==========

#[test]
fn test_extraction_context() {
    let document = (0..300)
        .map(|i| format!("Line {i}: the company reported metric {i} for the period."))
        .collect::<Vec<_>>()
        .join("\n");
    let instructions = "Extract  all   facts.";
    let ctx = compose_extraction_context(&document, instructions);
    assert!(ctx.document.compressed_length <= EXTRACTION_DOCUMENT_MAX_CHARS);
    assert!(ctx.document.compressed.lines().count() <= EXTRACTION_DOCUMENT_SUMMARY_LINES);
    assert_eq!(ctx.instructions.compressed, instructions);
    assert!(ctx.reduction > 50.0);
}

#[test]
fn test_analysis_context() {
    let facts = "Fact: revenue increased. ".repeat(500);
    let hypotheses = "H1:  growth   is organic";
    let queries = numbered_lines(400);
    let ctx = compose_analysis_context(&facts, hypotheses, &queries);
    assert!(ctx.facts.compressed_length <= ANALYSIS_FACTS_MAX_CHARS);
    assert_eq!(ctx.hypotheses.compressed, hypotheses);
    assert!(ctx.queries.compressed_length <= ANALYSIS_QUERIES_MAX_CHARS);
    assert!(ctx.reduction > 0.0);
}

#[test]
fn test_analysis_context_empty() {
    let ctx = compose_analysis_context("", "", "");
    assert_eq!(ctx.reduction, 0.0);
}
