//! Token estimation for prompt budgeting

/// Chars per token for pipe-table lines: digits, padding and separators
/// tokenize densely.
const TABLE_CHARS_PER_TOKEN: f64 = 2.8;
const PROSE_CHARS_PER_TOKEN: f64 = 4.0;

/// Rough BPE token count of a prompt mixing markdown tables and prose
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let mut table_chars = 0usize;
    let mut prose_chars = 0usize;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('|') {
            table_chars += trimmed.chars().count();
        } else {
            prose_chars += trimmed.chars().count();
        }
    }

    let estimate =
        table_chars as f64 / TABLE_CHARS_PER_TOKEN + prose_chars as f64 / PROSE_CHARS_PER_TOKEN;
    (estimate.ceil() as usize).max(1)
}
