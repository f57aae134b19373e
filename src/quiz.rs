//! Local quiz and flashcard generation.
//!
//! Placeholder-quality by design: without a remote generator there is no
//! distractor generation or question rewriting, so option A echoes the
//! source sentence and the remaining options are literals. Callers treat
//! this as the documented degraded mode, not a bug.

use crate::models::{Flashcard, QuizItem};
use crate::segment::split_sentences;
use crate::styles::truncate_chars;

/// Local flashcard output is always capped at this many cards.
const MAX_FLASHCARDS: usize = 10;

/// Build up to `count` multiple-choice items, one per sentence.
///
/// The sentence is the question stem; option A is a 60-char echo of it and
/// is always the correct answer.
pub fn local_quiz(text: &str, count: usize) -> Vec<QuizItem> {
    split_sentences(text)
        .into_iter()
        .take(count)
        .map(|s| QuizItem {
            options: vec![
                truncate_chars(&s, 60),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            question: s,
            answer: "A".to_string(),
        })
        .collect()
}

/// Build up to [`MAX_FLASHCARDS`] cards: front is a question wrapping a
/// 50-char preview of the sentence, back is the full sentence.
pub fn local_flashcards(text: &str) -> Vec<Flashcard> {
    split_sentences(text)
        .into_iter()
        .take(MAX_FLASHCARDS)
        .map(|s| Flashcard {
            front: format!("What about: {}...?", truncate_chars(&s, 50)),
            back: s,
        })
        .collect()
}
