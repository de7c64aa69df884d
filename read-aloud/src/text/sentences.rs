//! Sentence segmentation on terminal punctuation.

use regex::Regex;
use std::sync::OnceLock;

/// Global matcher instance (lazy initialization).
static SENTENCE: OnceLock<Regex> = OnceLock::new();

/// Get or initialize the sentence matcher: a run of text ending in `.`,
/// `!`, or `?`.
fn sentence_re() -> &'static Regex {
    SENTENCE.get_or_init(|| {
        Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern should compile")
    })
}

/// Split text into sentence-like units.
///
/// Units keep their trailing punctuation and leading whitespace, so
/// concatenating them reproduces the input. Text with no terminal
/// punctuation is one unit, and a trailing fragment without terminal
/// punctuation becomes the final unit.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    let mut consumed = 0;

    for m in sentence_re().find_iter(text) {
        units.push(m.as_str().to_string());
        consumed = m.end();
    }

    if units.is_empty() {
        if !text.trim().is_empty() {
            units.push(text.to_string());
        }
        return units;
    }

    let tail = &text[consumed..];
    if !tail.trim().is_empty() {
        units.push(tail.to_string());
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_into_sentences() {
        let units = split_into_sentences("Hello. World.");
        assert_eq!(units, vec!["Hello.", " World."]);
    }

    #[test]
    fn test_mixed_terminators() {
        let units = split_into_sentences("One. Two! Three?");
        assert_eq!(units.len(), 3);
        assert_eq!(units[1], " Two!");
        assert_eq!(units[2], " Three?");
    }

    #[test]
    fn test_no_delimiter_is_one_unit() {
        let units = split_into_sentences("no punctuation here");
        assert_eq!(units, vec!["no punctuation here"]);
    }

    #[test]
    fn test_trailing_fragment_kept() {
        let units = split_into_sentences("Complete sentence. and a tail");
        assert_eq!(units, vec!["Complete sentence.", " and a tail"]);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "First. Second! Third? tail";
        let units = split_into_sentences(text);
        assert_eq!(units.concat(), text);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   \n ").is_empty());
    }
}
