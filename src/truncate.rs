// src/truncate.rs
use crate::config::usize_from_env;

/// Default cap on embedding-model input, in characters.
/// Can be overridden with the EMBED_MAX_CHARS environment variable.
pub const DEFAULT_EMBED_MAX_CHARS: usize = 6000;

/// How far back from the cut point a sentence end is still worth keeping.
const SENTENCE_SEARCH_WINDOW: usize = 100;

/// Get the embedding input cap from environment or use default
pub fn embed_max_chars_from_env() -> usize {
    usize_from_env("EMBED_MAX_CHARS", DEFAULT_EMBED_MAX_CHARS)
}

/// Bounds `text` to `max_length` characters, preferring a sentence boundary.
///
/// Short input is returned unchanged. Otherwise the first `max_length`
/// characters are kept; if the last period in that window falls within its
/// final `SENTENCE_SEARCH_WINDOW` characters, the cut lands just after the
/// period so the embedding input does not end mid-sentence. Idempotent.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return text.to_string();
    }

    let window = &chars[..max_length];
    if let Some(last_period) = window.iter().rposition(|&c| c == '.') {
        if last_period + SENTENCE_SEARCH_WINDOW > max_length {
            return window[..=last_period].iter().collect();
        }
    }
    window.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_text("short sentence.", 6000), "short sentence.");
    }

    #[test]
    fn test_never_longer_than_max() {
        let text = "x".repeat(10_000);
        assert_eq!(truncate_text(&text, 6000).chars().count(), 6000);
    }

    #[test]
    fn test_cuts_at_sentence_boundary_near_limit() {
        // Period lands at index 149, within the 100-char window before the cut.
        let mut text = "y".repeat(149);
        text.push('.');
        text.push_str(&"z".repeat(500));

        let truncated = truncate_text(&text, 200);
        assert_eq!(truncated.chars().count(), 150);
        assert!(truncated.ends_with('.'));
    }

    #[test]
    fn test_hard_cut_when_period_too_early() {
        // Only period is at index 10, far outside the search window.
        let mut text = "a".repeat(10);
        text.push('.');
        text.push_str(&"b".repeat(500));

        let truncated = truncate_text(&text, 200);
        assert_eq!(truncated.chars().count(), 200);
        assert!(!truncated.ends_with('.'));
    }

    #[test]
    fn test_idempotent() {
        let text: String = "Kalimat pendek. ".repeat(800);
        let once = truncate_text(&text, 6000);
        let twice = truncate_text(&once, 6000);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multibyte_input() {
        let text = "kasus—putusan. ".repeat(100);
        let truncated = truncate_text(&text, 50);
        assert!(truncated.chars().count() <= 50);
    }
}
