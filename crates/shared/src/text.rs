//! Text helpers used when echoing free-form text into structured payloads.

/// Returns at most `max_chars` characters from the start of `text`.
///
/// Cuts on a character boundary, so multi-byte text never panics.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Returns `value` unless it is blank, in which case `placeholder` is used.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}
