//! Textual `url(...)` scan over the stylesheet body.
//!
//! Only the first `url(` on each line is picked up. Declarations such as
//! `src: url(a.woff2), url(a.woff)` yield `a.woff2` alone.

const URL_TOKEN: &str = "url(";

/// Extracts raw asset references in document order.
pub fn extract_references(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(reference_in_line)
        .map(str::to_string)
        .collect()
}

/// Text between the first `url(` and the next `)`, unquoted. `None` for lines
/// without a complete, non-empty token.
fn reference_in_line(line: &str) -> Option<&str> {
    let start = line.find(URL_TOKEN)? + URL_TOKEN.len();
    let inner = &line[start..];
    let end = inner.find(')')?;
    let token = inner[..end]
        .trim()
        .trim_matches(|c: char| c == '\'' || c == '"')
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
