//! Hybrid Analyzer - single entry point for all analysis calls.
//!
//! Dispatches each request to the statistical suite, the LLM adapter, or
//! both, per the caller's method preference:
//! - `traditional`: statistical algorithm only
//! - `llm`: adapter only; provider errors surface verbatim
//! - `auto`: adapter first, transparent fallback to the statistical method
//! - `hybrid`: both suites independently, plus a reconciliation recommendation
//!
//! Stateless per call: the only cross-call state is the immutable
//! configuration and the provider selected at construction.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use validator::Validate;

use crate::config::EngineConfig;
use crate::error::{AnalysisError, EngineError, ErrorKind};
use crate::llm::{self, LlmProvider, ProviderHealth, ProviderTask};
use crate::models::{
    AnalysisKind, AnalysisOutcome, AnalysisRequest, AnalysisMethod, Branch, ComprehensiveReport,
    HybridOutcome, LlmReport, MethodPreference, Recommendation, RecommendationConfidence,
    RecommendedMethod, SentimentLabel,
};
use crate::text::{stats, KeywordRanker, SentimentScorer, SimilarityScorer, Summarizer};

/// What an analysis call returns: one result, or the hybrid composite.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum AnalysisReport {
    Single(AnalysisOutcome),
    Hybrid(HybridOutcome),
}

/// Engine health snapshot, reflecting the provider's reachability probe.
#[derive(Debug, Clone, Serialize)]
pub struct EngineHealth {
    pub analyzer_status: &'static str,
    pub llm: ProviderHealth,
    pub use_llm: bool,
    pub provider: String,
}

/// Hybrid text analysis engine.
pub struct HybridAnalyzer {
    config: EngineConfig,
    provider: Option<Box<dyn LlmProvider>>,
    sentiment: SentimentScorer,
    keywords: KeywordRanker,
    summarizer: Summarizer,
    similarity: SimilarityScorer,
}

impl HybridAnalyzer {
    /// Build an analyzer from explicit configuration, constructing the
    /// configured provider.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let provider = llm::build_provider(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Build an analyzer with a caller-supplied provider (or none). The seam
    /// used by tests and by embedders bringing their own backend.
    pub fn with_provider(
        config: EngineConfig,
        provider: Option<Box<dyn LlmProvider>>,
    ) -> Self {
        Self {
            config,
            provider,
            sentiment: SentimentScorer::new(),
            keywords: KeywordRanker::new(),
            summarizer: Summarizer::new(),
            similarity: SimilarityScorer::new(),
        }
    }

    /// Load configuration from the environment and build.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_env()?)
    }

    /// Analyze one request. Invalid input is rejected before any algorithm
    /// or provider is invoked.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, EngineError> {
        self.validate(request)?;

        match request.method {
            MethodPreference::Traditional => {
                Ok(AnalysisReport::Single(self.run_traditional(request)?))
            }
            MethodPreference::Llm => {
                let provider = self.provider.as_deref().ok_or_else(|| {
                    EngineError::ProviderMisconfigured(
                        "LLM provider is disabled (LLM_PROVIDER=none)".to_string(),
                    )
                })?;
                let value = provider.analyze(&self.task_for(request)).await?;
                Ok(AnalysisReport::Single(AnalysisOutcome::Llm(value)))
            }
            MethodPreference::Auto => {
                if let Some(provider) = self.provider.as_deref() {
                    match provider.analyze(&self.task_for(request)).await {
                        Ok(value) => {
                            return Ok(AnalysisReport::Single(AnalysisOutcome::Llm(value)))
                        }
                        Err(e) => {
                            warn!(error = %e, "LLM analysis failed, falling back to traditional method");
                        }
                    }
                }
                Ok(AnalysisReport::Single(self.run_traditional(request)?))
            }
            MethodPreference::Hybrid => {
                Ok(AnalysisReport::Hybrid(self.run_hybrid(request).await))
            }
        }
    }

    /// Full statistical suite over one text: sentiment, keywords, summary,
    /// statistics and topics, each branch captured independently.
    pub fn comprehensive(&self, text: &str) -> ComprehensiveReport {
        let top_k = self.config.default_keywords_count;
        let max_length = self.config.default_summary_length;

        ComprehensiveReport {
            sentiment: Branch::Value(self.sentiment.analyze(text)),
            keywords: Branch::Value(self.keywords.rank(text, top_k)),
            summary: Branch::Value(self.summarizer.summarize(text, max_length)),
            statistics: Branch::Value(stats::text_stats(text)),
            topics: Branch::Value(self.keywords.topics(text)),
            analysis_method: AnalysisMethod::Traditional,
        }
    }

    /// Probe engine and provider health without mutating any state.
    pub async fn health_check(&self) -> EngineHealth {
        let llm = match self.provider.as_deref() {
            Some(provider) => provider.health_check().await,
            None => ProviderHealth {
                status: llm::HealthStatus::Unknown,
                provider: "none".to_string(),
                models: None,
                error: None,
            },
        };

        EngineHealth {
            analyzer_status: "healthy",
            llm,
            use_llm: self.provider.is_some(),
            provider: self.config.provider.as_str().to_string(),
        }
    }

    fn validate(&self, request: &AnalysisRequest) -> Result<(), EngineError> {
        request
            .validate()
            .map_err(|e| EngineError::InvalidInput(e.to_string()))?;

        if request.text.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "text must not be blank".to_string(),
            ));
        }
        if request.text.chars().count() > self.config.max_text_length {
            return Err(EngineError::InvalidInput(format!(
                "text exceeds the maximum length of {} characters",
                self.config.max_text_length
            )));
        }

        if request.kind == AnalysisKind::Similarity {
            let second = request.second_text.as_deref().unwrap_or_default();
            if second.trim().is_empty() {
                return Err(EngineError::InvalidInput(
                    "similarity requires a non-empty second text".to_string(),
                ));
            }
            if second.chars().count() > self.config.max_text_length {
                return Err(EngineError::InvalidInput(format!(
                    "second text exceeds the maximum length of {} characters",
                    self.config.max_text_length
                )));
            }
        }

        Ok(())
    }

    fn run_traditional(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, EngineError> {
        info!(kind = request.kind.as_str(), "running traditional analysis");
        let outcome = match request.kind {
            AnalysisKind::Sentiment => {
                AnalysisOutcome::Sentiment(self.sentiment.analyze(&request.text))
            }
            AnalysisKind::Keywords => {
                AnalysisOutcome::Keywords(self.keywords.rank(&request.text, self.top_k(request)))
            }
            AnalysisKind::Summary => AnalysisOutcome::Summary(
                self.summarizer
                    .summarize(&request.text, self.max_length(request)),
            ),
            AnalysisKind::Similarity => AnalysisOutcome::Similarity(
                self.similarity.compare(
                    &request.text,
                    request.second_text.as_deref().unwrap_or_default(),
                ),
            ),
        };
        Ok(outcome)
    }

    async fn run_hybrid(&self, request: &AnalysisRequest) -> HybridOutcome {
        let traditional = Branch::Value(self.comprehensive(&request.text));

        let llm = match self.provider.as_deref() {
            Some(provider) => Branch::Value(self.llm_comprehensive(provider, request).await),
            None => Branch::Error(AnalysisError {
                kind: ErrorKind::ProviderMisconfigured,
                message: "LLM provider is disabled".to_string(),
            }),
        };

        let recommendation = recommend(&traditional, &llm);

        HybridOutcome {
            traditional,
            llm,
            analysis_method: "hybrid",
            recommendation,
            generated_at: Utc::now(),
        }
    }

    /// LLM comprehensive analysis: the three single-text tasks run
    /// concurrently; each branch's outcome is captured independently.
    async fn llm_comprehensive(
        &self,
        provider: &dyn LlmProvider,
        request: &AnalysisRequest,
    ) -> LlmReport {
        let task = |kind| {
            let mut task = ProviderTask::new(kind, request.text.clone());
            task.top_k = self.top_k(request);
            task.max_length = self.max_length(request);
            task
        };

        let sentiment_task = task(AnalysisKind::Sentiment);
        let keywords_task = task(AnalysisKind::Keywords);
        let summary_task = task(AnalysisKind::Summary);
        let (sentiment, keywords, summary) = tokio::join!(
            provider.analyze(&sentiment_task),
            provider.analyze(&keywords_task),
            provider.analyze(&summary_task),
        );

        LlmReport {
            sentiment: sentiment.into(),
            keywords: keywords.into(),
            summary: summary.into(),
            analysis_method: AnalysisMethod::Llm,
            provider: provider.name().to_string(),
        }
    }

    fn task_for(&self, request: &AnalysisRequest) -> ProviderTask {
        ProviderTask {
            kind: request.kind,
            text: request.text.clone(),
            second_text: request.second_text.clone(),
            top_k: self.top_k(request),
            max_length: self.max_length(request),
        }
    }

    fn top_k(&self, request: &AnalysisRequest) -> usize {
        request.top_k.unwrap_or(self.config.default_keywords_count)
    }

    fn max_length(&self, request: &AnalysisRequest) -> usize {
        request
            .max_length
            .unwrap_or(self.config.default_summary_length)
    }
}

/// Compose the hybrid recommendation from the two branch outcomes.
///
/// The LLM branch counts as failed when it errored outright, when its
/// sentiment sub-branch errored, or when that sub-branch degraded to a
/// raw-text wrap (no structured label to compare against).
fn recommend(
    traditional: &Branch<ComprehensiveReport>,
    llm: &Branch<LlmReport>,
) -> Recommendation {
    let llm_sentiment = llm.value().map(|report| &report.sentiment);
    let llm_failed = match llm_sentiment {
        None => true,
        Some(branch) => match branch.value() {
            None => true,
            Some(value) => value.get("raw_response").is_some(),
        },
    };

    if llm_failed {
        return Recommendation {
            method: RecommendedMethod::TraditionalOnly,
            sentiment_agreement: None,
            confidence: RecommendationConfidence::Medium,
            note: "LLM分析失败，建议使用传统方法".to_string(),
        };
    }

    let llm_label: Option<&str> = llm_sentiment
        .and_then(Branch::value)
        .and_then(|v| v.get("sentiment"))
        .and_then(Value::as_str);
    let traditional_label: Option<SentimentLabel> = traditional
        .value()
        .and_then(|report| report.sentiment.value())
        .map(|s| s.sentiment);

    match (traditional_label, llm_label) {
        (Some(ours), Some(theirs)) => {
            let agree = ours.as_str() == theirs;
            Recommendation {
                method: RecommendedMethod::Hybrid,
                sentiment_agreement: Some(agree),
                confidence: if agree {
                    RecommendationConfidence::High
                } else {
                    RecommendationConfidence::Medium
                },
                note: if agree {
                    "两种方法结果一致，可信度高".to_string()
                } else {
                    "两种方法结果不同，建议人工判断".to_string()
                },
            }
        }
        _ => Recommendation {
            method: RecommendedMethod::Hybrid,
            sentiment_agreement: None,
            confidence: RecommendationConfidence::Medium,
            note: "建议结合两种方法的结果进行分析".to_string(),
        },
    }
}
