// src/sanitize/mod.rs

/// Highest code point the document font encoding can carry (Latin-1).
const LATIN1_MAX: char = '\u{00FF}';

/// Drops every character outside Latin-1. Nothing is replaced or escaped.
pub fn latin1_lossy(text: &str) -> String {
    text.chars().filter(|c| *c <= LATIN1_MAX).collect()
}

/// Title reduced to characters that are safe in a file name, trimmed.
pub fn file_stem(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}
