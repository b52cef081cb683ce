//! # Statistical Analysis Suite
//!
//! Deterministic, network-free text analysis for Chinese input.
//! Every algorithm here operates on the segmenter's output and produces
//! a result value per call; no state is shared across calls.
//!
//! ## Components
//! - `segment`: word and sentence segmentation (no inter-word delimiters)
//! - `sentiment`: lexicon bag-of-words polarity scoring
//! - `keywords`: TF-IDF and TextRank keyword ranking, topic extraction
//! - `summary`: leading-sentence extractive summarization
//! - `similarity`: cosine similarity over normalized term vectors
//! - `stats`: surface statistics for the comprehensive path

pub mod keywords;
pub mod segment;
pub mod sentiment;
pub mod similarity;
pub mod stats;
pub mod summary;

pub use keywords::KeywordRanker;
pub use sentiment::SentimentScorer;
pub use similarity::SimilarityScorer;
pub use summary::Summarizer;
