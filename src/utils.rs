

/// Cuts `text` to at most `max_chars` characters without splitting a code point.
pub fn safe_truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}


pub fn safe_truncate_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// One-line preview of a question or model reply for log output.
///
/// Runs of whitespace, newlines included, collapse to a single space.
pub fn log_preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    safe_truncate_ellipsis(&flat, max_chars)
}
