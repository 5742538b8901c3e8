//! Truncation to a character budget, preferring sentence or line ends.

/// Appended whenever text was cut.
pub const TRUNCATION_MARKER: &str = "\n[...truncated]";

/// A boundary is used only if it falls in the last 20% of the window.
const BOUNDARY_RATIO: (usize, usize) = (8, 10);

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(text.len())
}

/// Cut `text` to at most `max_chars` characters, marker included.
///
/// The cut lands just after the last `.` or newline if that sits at or after
/// 80% of the available window; otherwise it is a hard cut.
/// A `max_chars` no larger than the marker yields a bare cut with no marker.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let marker_len = TRUNCATION_MARKER.chars().count();
    if max_chars <= marker_len {
        return text[..byte_offset(text, max_chars)].to_string();
    }

    let window = max_chars - marker_len;
    let head = &text[..byte_offset(text, window)];
    let (num, den) = BOUNDARY_RATIO;
    let cut = match head.rfind(|c: char| c == '.' || c == '\n') {
        Some(pos) if head[..pos].chars().count() * den >= window * num => pos + 1,
        _ => head.len(),
    };
    format!("{}{}", head[..cut].trim_end(), TRUNCATION_MARKER)
}
