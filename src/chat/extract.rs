//! Fenced code block extraction from generated responses.

const FENCE: &str = "```";

/// Returns the body of the first complete fenced code block in `text`.
///
/// A block is a fence, an optional info word (`[A-Za-z0-9_]*`), a newline,
/// then everything up to the next fence. Returns `None` when no complete
/// block exists.
#[must_use]
pub fn first_fenced_block(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(FENCE) {
        let open = search_from + offset;
        let after_fence = open + FENCE.len();
        let info_len = text[after_fence..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        let newline = after_fence + info_len;
        if text[newline..].starts_with('\n') {
            let body_start = newline + 1;
            if let Some(close) = text[body_start..].find(FENCE) {
                return Some(&text[body_start..body_start + close]);
            }
            return None;
        }
        search_from = open + 1;
    }
    None
}

/// Extracts the code to apply from a generation response.
///
/// Uses the first fenced block when there is one, otherwise the raw text.
#[must_use]
pub fn extract_code(response: &str) -> &str {
    first_fenced_block(response).unwrap_or(response)
}
