//! Word and sentence segmentation.
//!
//! Chinese text carries no inter-word delimiters, so word boundaries come from
//! a dictionary-driven segmenter. The segmenter instance is expensive to build
//! (it loads the full dictionary) and is shared process-wide.

use std::sync::OnceLock;

use jieba_rs::Jieba;
use tracing::info;

static JIEBA: OnceLock<Jieba> = OnceLock::new();

/// Shared segmenter instance, initialized on first use.
pub(crate) fn jieba() -> &'static Jieba {
    JIEBA.get_or_init(|| {
        info!("Loading segmentation dictionary...");
        Jieba::new()
    })
}

/// Sentence-ending punctuation for the target script.
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '\n'];

/// Segment text into an ordered sequence of word tokens.
///
/// Deterministic and finite; empty input yields an empty sequence.
pub fn words(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    jieba().cut(text, true)
}

/// Split text into sentences on full-stop punctuation, discarding empty
/// fragments. Empty input yields an empty sequence, never an error.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
