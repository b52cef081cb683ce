//! Cosine similarity over normalized term-frequency vectors.
//!
//! Baseline normalization: lowercase, keep alphanumeric characters and
//! spaces, split on whitespace. The score is symmetric in its inputs, and a
//! zero-norm vector yields an undefined interpretation instead of a division
//! fault.

use std::collections::{HashMap, HashSet};

use crate::models::{
    round1, round3, AnalysisMethod, SimilarityInterpretation, SimilarityResult,
};

const HIGH_THRESHOLD: f64 = 0.8;
const MEDIUM_THRESHOLD: f64 = 0.5;

/// Term-vector cosine similarity scorer.
pub struct SimilarityScorer;

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compare two texts. Symmetric: swapping the inputs never changes the score.
    pub fn compare(&self, first: &str, second: &str) -> SimilarityResult {
        match cosine(&normalize(first), &normalize(second)) {
            Some(score) => SimilarityResult {
                similarity_score: round3(score),
                similarity_percentage: round1(score * 100.0),
                interpretation: interpretation_for(score),
                method: AnalysisMethod::Traditional,
            },
            None => SimilarityResult {
                similarity_score: 0.0,
                similarity_percentage: 0.0,
                interpretation: SimilarityInterpretation::Undefined,
                method: AnalysisMethod::Traditional,
            },
        }
    }
}

/// Lowercase, strip everything that is neither alphanumeric nor a space,
/// split on whitespace.
fn normalize(text: &str) -> Vec<String> {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    kept.split_whitespace().map(str::to_string).collect()
}

/// Cosine of the two term-frequency vectors over the union vocabulary.
/// `None` when either vector has zero norm.
fn cosine(words1: &[String], words2: &[String]) -> Option<f64> {
    let counts1 = term_counts(words1);
    let counts2 = term_counts(words2);

    let vocabulary: HashSet<&String> = counts1.keys().copied().chain(counts2.keys().copied()).collect();

    let mut dot = 0.0_f64;
    let mut norm1_sq = 0.0_f64;
    let mut norm2_sq = 0.0_f64;
    for term in vocabulary {
        let a = counts1.get(term).copied().unwrap_or(0) as f64;
        let b = counts2.get(term).copied().unwrap_or(0) as f64;
        dot += a * b;
        norm1_sq += a * a;
        norm2_sq += b * b;
    }

    if norm1_sq == 0.0 || norm2_sq == 0.0 {
        return None;
    }

    Some(dot / (norm1_sq.sqrt() * norm2_sq.sqrt()))
}

fn term_counts(words: &[String]) -> HashMap<&String, usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

/// Threshold bands: > 0.8 high, > 0.5 medium, else low.
fn interpretation_for(score: f64) -> SimilarityInterpretation {
    if score > HIGH_THRESHOLD {
        SimilarityInterpretation::High
    } else if score > MEDIUM_THRESHOLD {
        SimilarityInterpretation::Medium
    } else {
        SimilarityInterpretation::Low
    }
}
