//! # TextInsight Engine
//!
//! Hybrid text analysis engine for short Chinese passages: sentiment,
//! keyword extraction, summarization and similarity, computed by
//! deterministic statistical algorithms, by a pluggable LLM backend, or by
//! both with a reconciliation recommendation.
//!
//! The engine consumes plain text plus configuration and returns structured
//! results; HTTP routing, authentication and persistence belong to the
//! embedding service, not to this crate.
//!
//! ```no_run
//! use textinsight_engine::{AnalysisKind, AnalysisRequest, HybridAnalyzer};
//!
//! # async fn demo() -> Result<(), textinsight_engine::EngineError> {
//! let analyzer = HybridAnalyzer::from_env()?;
//! let request = AnalysisRequest::new(AnalysisKind::Sentiment, "质量很好，非常满意。");
//! let report = analyzer.analyze(&request).await?;
//! # let _ = report;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod text;

pub use analyzer::{AnalysisReport, EngineHealth, HybridAnalyzer};
pub use config::{EngineConfig, ProviderKind};
pub use error::{AnalysisError, EngineError, ErrorKind};
pub use models::{
    AnalysisKind, AnalysisOutcome, AnalysisRequest, AnalysisMethod, Branch, ComprehensiveReport,
    HybridOutcome, KeywordScore, KeywordsResult, LlmReport, MethodPreference, Recommendation,
    RecommendationConfidence, RecommendedMethod, SentimentConfidence, SentimentLabel,
    SentimentResult, SimilarityInterpretation, SimilarityResult, SummaryResult, TextStats,
    TopicsResult, TopicWeight,
};

#[cfg(test)]
mod tests;
