/// Shortens `text` to at most `max_length` characters, preferring to end on a
/// complete sentence. When the window holds no `.`, `!` or `?` the text is cut
/// at the last whitespace and `...` appended.
pub fn truncate_description(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.into();
    }

    // Byte offset of the end of the `max_length` character window
    let end = text
        .char_indices()
        .nth(max_length)
        .map(|(i, _)| i)
        .unwrap_or_else(|| text.len());
    let window = &text[..end];

    if let Some(pos) = window.rfind(|c: char| c == '.' || c == '!' || c == '?') {
        // All three marks are one byte wide
        return window[..pos + 1].trim().into();
    }

    let cut = match window.rfind(char::is_whitespace) {
        Some(pos) => &window[..pos],
        None => window,
    };
    format!("{}...", cut.trim())
}
