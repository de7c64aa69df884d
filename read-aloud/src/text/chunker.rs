//! Text chunking for stable sequential speech playback.

use super::sentences::split_into_sentences;

/// Default maximum chunk length in characters.
pub const DEFAULT_MAX_CHUNK: usize = 500;

/// Split text into bounded-length, sentence-respecting chunks.
///
/// Consecutive sentence units are packed greedily into a chunk until
/// adding the next unit would push it past `max_len`. A single sentence
/// longer than `max_len` forms its own oversized chunk; sentences are
/// never split mid-word. `max_len = 1` forces one sentence per chunk.
///
/// Every returned chunk is trimmed and non-empty.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for unit in split_into_sentences(text) {
        if !current.is_empty() && current.len() + unit.len() > max_len {
            push_chunk(&mut chunks, &current);
            current.clear();
        }
        current.push_str(&unit);
    }
    push_chunk(&mut chunks, &current);

    chunks
}

fn push_chunk(chunks: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("Hello world. This is a test!", 500);
        assert_eq!(chunks, vec!["Hello world. This is a test!"]);
    }

    #[test]
    fn test_small_limit_splits_per_sentence() {
        let chunks = chunk_text("Hello world. This is a test!", 10);
        assert_eq!(chunks, vec!["Hello world.", "This is a test!"]);
    }

    #[test]
    fn test_limit_of_one_forces_one_sentence_per_chunk() {
        let chunks = chunk_text("One. Two! Three?", 1);
        assert_eq!(chunks, vec!["One.", "Two!", "Three?"]);
    }

    #[test]
    fn test_packs_sentences_up_to_limit() {
        let chunks = chunk_text("One. Two. Three. Four.", 10);
        assert_eq!(chunks, vec!["One. Two.", "Three.", "Four."]);
    }

    #[test]
    fn test_oversized_sentence_is_its_own_chunk() {
        let text = "Short. This sentence is far too long for the limit. End.";
        let chunks = chunk_text(text, 12);
        assert_eq!(
            chunks,
            vec![
                "Short.",
                "This sentence is far too long for the limit.",
                "End."
            ]
        );
    }

    #[test]
    fn test_no_delimiter_is_one_chunk() {
        let chunks = chunk_text("no terminal punctuation at all", 500);
        assert_eq!(chunks, vec!["no terminal punctuation at all"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 500).is_empty());
        assert!(chunk_text("   \n\n   ", 500).is_empty());
    }

    proptest! {
        #[test]
        fn chunks_are_nonempty_and_preserve_words(
            sentences in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,5}[.!?]", 1..8),
            max_len in 1usize..200,
        ) {
            let text = sentences.join(" ");
            let chunks = chunk_text(&text, max_len);

            prop_assert!(chunks.iter().all(|c| !c.trim().is_empty()));

            let original: Vec<&str> = text.split_whitespace().collect();
            let rebuilt: Vec<&str> =
                chunks.iter().flat_map(|c| c.split_whitespace()).collect();
            prop_assert_eq!(original, rebuilt);

            // A chunk over the limit must be a single oversized sentence.
            for chunk in &chunks {
                if chunk.len() > max_len {
                    prop_assert_eq!(split_into_sentences(chunk).len(), 1);
                }
            }
        }
    }
}
