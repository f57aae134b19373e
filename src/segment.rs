//! Sentence segmentation for the local study pipeline.
//!
//! Splits text on the three terminator characters `.`, `!`, `?` by plain
//! character accumulation. There are no sentence-boundary heuristics:
//! abbreviations and decimal numbers split too, and the short fragments that
//! produces are discarded by the length filter rather than merged. This
//! keeps segmentation fully deterministic and cheap.

/// Upper bound on sentences returned for a single document.
pub const MAX_SENTENCES: usize = 1000;

/// Minimum trimmed length (in chars) for a terminated sentence to be kept.
const MIN_SENTENCE_CHARS: usize = 20;

/// Split text into an ordered list of sentences.
///
/// A sentence is a run of characters up to and including `.`, `!`, or `?`,
/// kept only if its trimmed length exceeds [`MIN_SENTENCE_CHARS`]. A final
/// unterminated fragment is kept regardless of length. At most
/// [`MAX_SENTENCES`] sentences are returned (earliest kept). Empty input
/// yields an empty list; this function has no error conditions.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut buf = String::new();

    for ch in text.chars() {
        buf.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = buf.trim();
            if trimmed.chars().count() > MIN_SENTENCE_CHARS {
                sentences.push(trimmed.to_string());
            }
            buf.clear();
        }
    }

    let tail = buf.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences.truncate(MAX_SENTENCES);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_short_terminated_fragments_dropped() {
        // "Dr." and "No." are under the length floor
        let sents = split_sentences("Dr. No. This sentence is long enough to keep.");
        assert_eq!(
            sents,
            vec!["This sentence is long enough to keep.".to_string()]
        );
    }

    #[test]
    fn test_all_three_terminators() {
        let text = "This one ends with a period. Does this one end with a question mark? This one ends with an exclamation!";
        let sents = split_sentences(text);
        assert_eq!(sents.len(), 3);
        assert!(sents[0].ends_with('.'));
        assert!(sents[1].ends_with('?'));
        assert!(sents[2].ends_with('!'));
    }

    #[test]
    fn test_dangling_tail_kept_regardless_of_length() {
        let sents = split_sentences("A complete sentence that is long enough. tail");
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[1], "tail");
    }

    #[test]
    fn test_order_matches_source() {
        let text = "First sentence of the document here. Second sentence of the document here. Third sentence of the document here.";
        let sents = split_sentences(text);
        assert_eq!(sents.len(), 3);
        assert!(sents[0].starts_with("First"));
        assert!(sents[1].starts_with("Second"));
        assert!(sents[2].starts_with("Third"));
    }

    #[test]
    fn test_cap_keeps_earliest() {
        let text = (0..1200)
            .map(|i| format!("Sentence number {} padded out to length.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let sents = split_sentences(&text);
        assert_eq!(sents.len(), MAX_SENTENCES);
        assert!(sents[0].contains("number 0"));
        assert!(sents[999].contains("number 999"));
    }

    #[test]
    fn test_non_final_sentences_are_terminated_and_long() {
        let text = "Mixed input with a no. decimal 3.14 and short bits! Another reasonably long sentence follows here? trailing bit";
        let sents = split_sentences(text);
        for s in &sents[..sents.len() - 1] {
            assert!(s.chars().count() > MIN_SENTENCE_CHARS, "too short: {}", s);
            assert!(
                s.ends_with('.') || s.ends_with('!') || s.ends_with('?'),
                "unterminated: {}",
                s
            );
        }
    }

    #[test]
    fn test_trimming() {
        let sents = split_sentences("   Surrounded by whitespace but long enough.   ");
        assert_eq!(
            sents,
            vec!["Surrounded by whitespace but long enough.".to_string()]
        );
    }
}
