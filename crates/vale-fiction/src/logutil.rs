//! Keeps player input and content strings on one log line.

/// Characters of a string kept in a log line before it is cut with `…`.
///
/// Comfortably longer than any command a player types, so only pasted
/// text and long content strings get shortened.
pub const MAX_PREVIEW: usize = 120;

/// Escape control characters and backslashes, and cut long strings.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW));
    for ch in s.chars().take(MAX_PREVIEW) {
        if ch == '\\' || ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    if s.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}
