//! Surface text statistics for the comprehensive path.

use std::collections::HashSet;

use crate::models::{round2, TextStats};

use super::segment;

/// Character, word and sentence counts plus lexical spread, all derived from
/// the segmenter's output.
pub fn text_stats(text: &str) -> TextStats {
    let words = segment::words(text);
    let sentence_count = segment::sentences(text).len();

    let word_count = words.len();
    let unique_words = words.iter().collect::<HashSet<_>>().len();
    let avg_sentence_length = if sentence_count > 0 {
        round2(word_count as f64 / sentence_count as f64)
    } else {
        0.0
    };

    TextStats {
        char_count: text.chars().count(),
        word_count,
        sentence_count,
        avg_sentence_length,
        unique_words,
    }
}
