//! Helpers for keeping log lines bounded.

/// Default maximum number of characters of user or upstream data in a log line.
pub const LOG_VALUE_MAX_CHARS: usize = 128;

/// Truncates `value` to at most `max_chars` characters, appending `...` when
/// something was cut. Never splits a UTF-8 character.
pub fn truncate_for_log(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &value[..idx]),
        None => value.to_string(),
    }
}
