//! Aggressive summary by line sampling.

/// Fraction of lines kept verbatim at each end, as `n / HEAD_TAIL_DIVISOR`.
const HEAD_TAIL_DIVISOR: usize = 5;

/// Reduce `text` to at most `summary_length` lines: the first and last 20%
/// of lines verbatim, plus an evenly strided sample of the middle.
/// Text with `summary_length` lines or fewer is returned unchanged.
pub fn summarize(text: &str, summary_length: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let n = lines.len();
    if n <= summary_length {
        return text.to_string();
    }

    let head = n / HEAD_TAIL_DIVISOR;
    let tail = n / HEAD_TAIL_DIVISOR;
    let middle = &lines[head..n - tail];
    let budget = summary_length.saturating_sub(head + tail);

    let mut kept: Vec<&str> = Vec::with_capacity(summary_length + tail);
    kept.extend_from_slice(&lines[..head]);
    if budget > 0 && !middle.is_empty() {
        let stride = (middle.len() / budget).max(1);
        kept.extend(middle.iter().step_by(stride).take(budget));
    }
    kept.extend_from_slice(&lines[n - tail..]);
    kept.truncate(summary_length);
    kept.join("\n")
}
