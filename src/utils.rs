//! Text helpers shared by the fetcher and the digest composer.

/// Quick sniff for markup, used to decide whether a fetched body needs tag
/// stripping or can pass through as raw text.
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE")
        || head.starts_with("<!doctype")
        || head.starts_with("<html")
        || head.contains("<body")
        || head.contains("</p>")
        || head.contains("<div")
}

/// Extract plain text from HTML by dropping tags and collapsing whitespace.
pub fn extract_text_from_html(html: &str) -> String {
    html.chars()
        .fold((String::new(), false), |(mut text, in_tag), c| match c {
            '<' => (text, true),
            '>' => {
                text.push(' ');
                (text, false)
            }
            _ if !in_tag => {
                text.push(c);
                (text, in_tag)
            }
            _ => (text, in_tag),
        })
        .0
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_len` bytes without splitting a character.
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Truncate text to a maximum length, preferring sentence boundaries and
/// falling back to word boundaries.
pub fn smart_truncate(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    let truncated = truncate_chars(text, max_length);
    if let Some(last_sentence) = truncated.rfind('.') {
        truncated[..last_sentence + 1].to_string()
    } else if let Some(last_space) = truncated.rfind(' ') {
        format!("{}...", &truncated[..last_space])
    } else {
        format!("{}...", truncated)
    }
}
