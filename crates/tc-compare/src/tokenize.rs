//! Tokenization for the comparison engine.
//!
//! Two families of splitters live here:
//!
//! - [`tokenize`] produces lowercased word tokens for the frequency-based
//!   metrics. Whitespace and punctuation-only spans are dropped.
//! - [`split_units`] partitions a document into diff units (lines or
//!   word/separator runs). Nothing is dropped, so concatenating the units
//!   always yields the input again.
//!
//! Example:
//!   "The Lender shall, upon request," →
//!   tokens: [the][lender][shall][upon][request]
//!   word units: [The][ ][Lender][ ][shall][,][ ][upon][ ][request][,]

use tc_core::Granularity;
use unicode_segmentation::UnicodeSegmentation;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize `text` into lowercased word tokens on Unicode word boundaries.
///
/// Order is preserved. Spans consisting only of whitespace or punctuation are
/// not emitted.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(normalize_token).collect()
}

/// Normalize a token for frequency comparison.
pub fn normalize_token(token: &str) -> String {
    token.to_lowercase()
}

/// Split `text` into diff units for the given granularity.
pub fn split_units(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Line => split_lines(text),
        Granularity::Word => split_words(text),
    }
}

/// Split `text` into lines, each keeping the `\n` that terminates it.
///
/// A final line without a trailing newline is still returned.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Split `text` on Unicode word boundaries, keeping every segment.
///
/// Words, whitespace runs and punctuation each become their own unit.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_word_bounds().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_word_splitting() {
        let tokens = tokenize("The Borrower shall repay");
        assert_eq!(tokens, vec!["the", "borrower", "shall", "repay"]);
    }

    #[test]
    fn punctuation_is_dropped() {
        let tokens = tokenize("The Borrower shall, upon request,");
        assert_eq!(tokens, vec!["the", "borrower", "shall", "upon", "request"]);
    }

    #[test]
    fn punctuation_only_returns_empty() {
        assert!(tokenize("... , ; -- !!").is_empty());
    }

    #[test]
    fn empty_string_returns_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn whitespace_only_returns_empty() {
        assert!(tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn contractions_and_decimals_stay_whole() {
        let tokens = tokenize("Don't pay 3.14 now");
        assert_eq!(tokens, vec!["don't", "pay", "3.14", "now"]);
    }

    #[test]
    fn non_ascii_lowercasing() {
        let tokens = tokenize("Ångström CAFÉ");
        assert_eq!(tokens, vec!["ångström", "café"]);
    }

    #[test]
    fn tokenize_is_deterministic() {
        let text = "alpha beta, Gamma alpha";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn lines_keep_their_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a\n", "b\n"]);
    }

    #[test]
    fn trailing_line_without_newline_is_captured() {
        assert_eq!(split_lines("a\nb"), vec!["a\n", "b"]);
    }

    #[test]
    fn blank_lines_are_units() {
        assert_eq!(split_lines("a\n\nb"), vec!["a\n", "\n", "b"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
        assert!(split_words("").is_empty());
    }

    #[test]
    fn word_units_preserve_whitespace_and_punctuation() {
        let units = split_words("shall, upon  request");
        assert_eq!(units.concat(), "shall, upon  request");
        assert!(units.contains(&"shall"));
        assert!(units.contains(&","));
        assert!(units.contains(&"upon"));
        assert!(units.contains(&"request"));
    }

    #[test]
    fn split_units_reconstructs_input() {
        let text = "first line\n  second, line\n\nlast";
        for g in [Granularity::Line, Granularity::Word] {
            assert_eq!(split_units(text, g).concat(), text, "granularity {}", g);
        }
    }
}
