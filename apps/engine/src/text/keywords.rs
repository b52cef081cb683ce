//! Keyword ranking and topic extraction.
//!
//! Two independent rankings are produced for every request: TF-IDF weighting
//! against the segmenter's background corpus statistics, and TextRank
//! centrality over a token co-occurrence graph. Their weights are not
//! comparable to each other.

use std::sync::OnceLock;

use jieba_rs::{KeywordExtract, TextRank, TfIdf};

use crate::models::{round3, AnalysisMethod, KeywordScore, KeywordsResult, TopicWeight, TopicsResult};

use super::segment;

static TFIDF: OnceLock<TfIdf> = OnceLock::new();
static TEXTRANK: OnceLock<TextRank> = OnceLock::new();

fn tfidf() -> &'static TfIdf {
    TFIDF.get_or_init(TfIdf::default)
}

fn textrank() -> &'static TextRank {
    TEXTRANK.get_or_init(TextRank::default)
}

/// Part-of-speech filter for graph ranking: place names, nouns, verbal nouns
/// and verbs.
fn textrank_pos() -> Vec<String> {
    ["ns", "n", "vn", "v"].iter().map(|s| s.to_string()).collect()
}

/// Number of TextRank terms reported as topics on the comprehensive path.
const TOPIC_COUNT: usize = 5;

/// Ranks keywords with both strategies.
pub struct KeywordRanker;

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRanker {
    pub fn new() -> Self {
        Self
    }

    /// Frequency-weighted ranking. At most `top_k` terms, descending weight,
    /// no duplicates; fewer terms than requested when the text is short.
    pub fn tfidf_keywords(&self, text: &str, top_k: usize) -> Vec<KeywordScore> {
        tfidf()
            .extract_keywords(segment::jieba(), text, top_k, Vec::new())
            .into_iter()
            .map(|k| KeywordScore {
                word: k.keyword,
                weight: round3(k.weight),
            })
            .collect()
    }

    /// Graph-rank ranking: window-based co-occurrence edges, iterative rank
    /// propagation to convergence.
    pub fn textrank_keywords(&self, text: &str, top_k: usize) -> Vec<KeywordScore> {
        textrank()
            .extract_keywords(segment::jieba(), text, top_k, textrank_pos())
            .into_iter()
            .map(|k| KeywordScore {
                word: k.keyword,
                weight: round3(k.weight),
            })
            .collect()
    }

    /// Both rankings together; callers needing a single ranking choose one.
    pub fn rank(&self, text: &str, top_k: usize) -> KeywordsResult {
        KeywordsResult {
            tfidf_keywords: self.tfidf_keywords(text, top_k),
            textrank_keywords: self.textrank_keywords(text, top_k),
            method: AnalysisMethod::Traditional,
        }
    }

    /// Top TextRank terms with a fixed count, for the comprehensive path.
    pub fn topics(&self, text: &str) -> TopicsResult {
        let main_topics: Vec<TopicWeight> = self
            .textrank_keywords(text, TOPIC_COUNT)
            .into_iter()
            .map(|k| TopicWeight {
                topic: k.word,
                weight: k.weight,
            })
            .collect();
        let topic_count = main_topics.len();
        TopicsResult {
            main_topics,
            topic_count,
        }
    }
}
