//! Extractive summarization.
//!
//! Position-based baseline: the first three sentences stand in for the text.
//! Texts of three or fewer sentences pass through unchanged.

use tracing::debug;

use crate::models::{round3, AnalysisMethod, SummaryResult};

/// Sentence terminator used for splitting and re-joining.
const TERMINATOR: char = '。';

/// Number of leading sentences kept in a summary.
const LEAD_SENTENCES: usize = 3;

/// Leading-sentence extractive summarizer.
pub struct Summarizer;

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize text. `max_length` is an advisory character budget; it is
    /// not enforced as a hard cutoff.
    pub fn summarize(&self, text: &str, max_length: usize) -> SummaryResult {
        debug!(max_length, "generating extractive summary");

        let original_length = text.chars().count();
        let sentences: Vec<&str> = text
            .split(TERMINATOR)
            .filter(|s| !s.is_empty())
            .collect();

        if sentences.len() <= LEAD_SENTENCES {
            return SummaryResult {
                summary: text.to_string(),
                length: original_length,
                original_length,
                compression_ratio: 1.0,
                method: AnalysisMethod::Traditional,
            };
        }

        let mut summary = sentences[..LEAD_SENTENCES].join("。");
        summary.push(TERMINATOR);
        let length = summary.chars().count();

        SummaryResult {
            summary,
            length,
            original_length,
            compression_ratio: round3(length as f64 / original_length as f64),
            method: AnalysisMethod::Traditional,
        }
    }
}
