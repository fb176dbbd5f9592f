//! Token budget estimation and both-ends truncation.
//!
//! Exact tokenization is provider-specific and unavailable at this layer,
//! so size is estimated with a fixed chars-per-token heuristic. Oversized
//! content keeps the first and last halves of the allowed budget with an
//! explicit marker at the join — a document's opening framing and closing
//! conclusions carry more signal than an arbitrary middle slice, so this
//! deliberately beats naive prefix truncation.

/// Heuristic characters per token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Marker inserted where the middle of an oversized document was removed.
pub const TRUNCATION_MARKER: &str =
    "\n\n[... middle of document omitted to fit the processing budget ...]\n\n";

/// Characters reserved for the marker when splitting the budget.
const MARKER_RESERVE: usize = 100;

/// Estimated token count for a text.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.chars().count().div_ceil(CHARS_PER_TOKEN)) as u32
}

/// Content after budget enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetedContent {
    /// The (possibly truncated) text to prompt with.
    pub text: String,
    /// Whether truncation occurred.
    pub truncated: bool,
}

/// Fit `content` within `max_input_tokens`.
///
/// Content at or under the cap passes through unchanged. Oversized content
/// is cut to the first and last halves of the character budget, joined by
/// [`TRUNCATION_MARKER`], and never exceeds the cap. Char-boundary safe.
pub fn fit_to_budget(content: &str, max_input_tokens: u32) -> BudgetedContent {
    let budget_chars = max_input_tokens as usize * CHARS_PER_TOKEN;
    let char_count = content.chars().count();

    if char_count <= budget_chars {
        return BudgetedContent {
            text: content.to_owned(),
            truncated: false,
        };
    }

    let keep = budget_chars.saturating_sub(MARKER_RESERVE);
    if keep == 0 {
        // Cap too small to fit the marker at all; hard prefix cut.
        return BudgetedContent {
            text: content.chars().take(budget_chars).collect(),
            truncated: true,
        };
    }
    let head_chars = keep / 2;
    let tail_chars = keep - head_chars;

    let head: String = content.chars().take(head_chars).collect();
    let tail_start = char_count - tail_chars;
    let tail: String = content.chars().skip(tail_start).collect();

    let mut text = String::with_capacity(head.len() + TRUNCATION_MARKER.len() + tail.len());
    text.push_str(&head);
    text.push_str(TRUNCATION_MARKER);
    text.push_str(&tail);

    BudgetedContent {
        text,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn content_at_cap_passes_through() {
        // 100 tokens * 4 chars = 400 chars exactly.
        let content = "x".repeat(400);
        let result = fit_to_budget(&content, 100);
        assert!(!result.truncated);
        assert_eq!(result.text, content);
    }

    #[test]
    fn one_char_over_cap_truncates_with_single_marker() {
        let content = "x".repeat(401);
        let result = fit_to_budget(&content, 100);
        assert!(result.truncated);
        assert_eq!(result.text.matches(TRUNCATION_MARKER).count(), 1);
        assert!(result.text.chars().count() <= 400);
    }

    #[test]
    fn truncation_keeps_both_ends() {
        let head = "BEGIN ".repeat(200);
        let tail = " FINAL".repeat(200);
        let content = format!("{head}{}{tail}", "m".repeat(10_000));
        let result = fit_to_budget(&content, 200);
        assert!(result.truncated);
        assert!(result.text.starts_with("BEGIN"));
        assert!(result.text.ends_with("FINAL"));
    }

    #[test]
    fn truncated_content_within_budget() {
        let content = "word ".repeat(5_000);
        let result = fit_to_budget(&content, 150);
        assert!(result.text.chars().count() <= 150 * CHARS_PER_TOKEN);
    }

    #[test]
    fn tiny_cap_never_exceeds_budget() {
        // 10 tokens * 4 chars = 40 chars, smaller than the marker itself.
        let content = "x".repeat(500);
        let result = fit_to_budget(&content, 10);
        assert!(result.truncated);
        assert!(result.text.chars().count() <= 40);
        assert!(!result.text.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn multibyte_content_is_boundary_safe() {
        let content = "日本語のテキスト。".repeat(500);
        let result = fit_to_budget(&content, 100);
        assert!(result.truncated);
        // Would panic on a byte-slicing implementation; also verify budget.
        assert!(result.text.chars().count() <= 400);
    }
}
