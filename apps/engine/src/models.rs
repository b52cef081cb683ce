use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{AnalysisError, EngineError};

/// The analysis service requested for a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Sentiment,
    Keywords,
    Summary,
    Similarity,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Sentiment => "sentiment",
            AnalysisKind::Keywords => "keywords",
            AnalysisKind::Summary => "summary",
            AnalysisKind::Similarity => "similarity",
        }
    }
}

/// How the caller wants the analysis computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodPreference {
    /// Statistical algorithms only.
    Traditional,
    /// LLM only; provider errors surface verbatim.
    Llm,
    /// Both methods plus a reconciliation recommendation.
    Hybrid,
    /// LLM first, transparent fallback to the statistical method on failure.
    #[default]
    Auto,
}

/// A single analysis request. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub text: String,
    pub kind: AnalysisKind,
    /// Number of keywords to return; engine default applies when absent.
    #[validate(range(min = 1))]
    pub top_k: Option<usize>,
    /// Advisory summary length budget in characters.
    #[validate(range(min = 1))]
    pub max_length: Option<usize>,
    /// Second text for similarity requests.
    pub second_text: Option<String>,
    #[serde(default)]
    pub method: MethodPreference,
}

impl AnalysisRequest {
    pub fn new(kind: AnalysisKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            top_k: None,
            max_length: None,
            second_text: None,
            method: MethodPreference::default(),
        }
    }
}

/// Which method actually produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Traditional,
    Llm,
}

/// Sentiment polarity label, serialized with the product's Chinese vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "积极")]
    Positive,
    #[serde(rename = "消极")]
    Negative,
    #[serde(rename = "中性")]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "积极",
            SentimentLabel::Negative => "消极",
            SentimentLabel::Neutral => "中性",
        }
    }
}

/// Confidence band attached to a sentiment result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentConfidence {
    #[serde(rename = "高")]
    High,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "低")]
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    /// Polarity score in [0, 1], rounded to 3 decimal digits.
    pub score: f64,
    pub confidence: SentimentConfidence,
    pub method: AnalysisMethod,
}

/// One ranked keyword with its relevance weight.
///
/// Weights are comparable only within a single ranking method's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordScore {
    pub word: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsResult {
    /// Frequency-weighted ranking against the background corpus statistics.
    pub tfidf_keywords: Vec<KeywordScore>,
    /// Co-occurrence-graph centrality ranking.
    pub textrank_keywords: Vec<KeywordScore>,
    pub method: AnalysisMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    /// Summary length in characters.
    pub length: usize,
    pub original_length: usize,
    pub compression_ratio: f64,
    pub method: AnalysisMethod,
}

/// Similarity band, serialized with the product's Chinese vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityInterpretation {
    #[serde(rename = "高度相似")]
    High,
    #[serde(rename = "中度相似")]
    Medium,
    #[serde(rename = "低度相似")]
    Low,
    /// Either text had no alphanumeric tokens after normalization.
    #[serde(rename = "无法计算相似度")]
    Undefined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Cosine similarity in [0, 1], rounded to 3 decimal digits.
    pub similarity_score: f64,
    /// Score expressed as a percentage, rounded to 1 decimal digit.
    pub similarity_percentage: f64,
    pub interpretation: SimilarityInterpretation,
    pub method: AnalysisMethod,
}

/// Surface statistics derived from segmentation, for the comprehensive path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Mean words per sentence, rounded to 2 decimal digits.
    pub avg_sentence_length: f64,
    pub unique_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicWeight {
    pub topic: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsResult {
    pub main_topics: Vec<TopicWeight>,
    pub topic_count: usize,
}

/// Result of a single-kind analysis call.
///
/// Serialized untagged: callers receive the bare result object for the
/// requested kind, or the decoded LLM value for the LLM path.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Sentiment(SentimentResult),
    Keywords(KeywordsResult),
    Summary(SummaryResult),
    Similarity(SimilarityResult),
    /// Decoded structured value from the LLM adapter, or its raw-text wrap.
    Llm(Value),
}

/// Per-branch capture: a composite result holds either the branch's value or
/// the structured error that branch produced. One branch failing never
/// suppresses its siblings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Branch<T> {
    Value(T),
    Error(AnalysisError),
}

impl<T> Branch<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Branch::Value(v) => Some(v),
            Branch::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            Branch::Value(_) => None,
            Branch::Error(e) => Some(e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Branch::Error(_))
    }
}

impl<T> From<Result<T, EngineError>> for Branch<T> {
    fn from(result: Result<T, EngineError>) -> Self {
        match result {
            Ok(v) => Branch::Value(v),
            Err(e) => Branch::Error(e.into()),
        }
    }
}

/// Full statistical suite over one text.
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveReport {
    pub sentiment: Branch<SentimentResult>,
    pub keywords: Branch<KeywordsResult>,
    pub summary: Branch<SummaryResult>,
    pub statistics: Branch<TextStats>,
    pub topics: Branch<TopicsResult>,
    pub analysis_method: AnalysisMethod,
}

/// LLM comprehensive analysis: sentiment + keywords + summary via the adapter.
#[derive(Debug, Clone, Serialize)]
pub struct LlmReport {
    pub sentiment: Branch<Value>,
    pub keywords: Branch<Value>,
    pub summary: Branch<Value>,
    pub analysis_method: AnalysisMethod,
    pub provider: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedMethod {
    TraditionalOnly,
    Hybrid,
}

/// Confidence of the hybrid recommendation. Kept English-valued, unlike the
/// Chinese sentiment confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationConfidence {
    High,
    Medium,
}

/// Reconciliation verdict for a hybrid analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub method: RecommendedMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_agreement: Option<bool>,
    pub confidence: RecommendationConfidence,
    pub note: String,
}

/// Outcome of a hybrid request: both method branches plus the recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct HybridOutcome {
    pub traditional: Branch<ComprehensiveReport>,
    pub llm: Branch<LlmReport>,
    pub analysis_method: &'static str,
    pub recommendation: Recommendation,
    pub generated_at: DateTime<Utc>,
}

/// Round to 3 decimal digits for presentation; internal math keeps full precision.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_label_serialization() {
        assert_eq!(
            serde_json::to_string(&SentimentLabel::Positive).unwrap(),
            "\"积极\""
        );
        assert_eq!(
            serde_json::to_string(&SimilarityInterpretation::Undefined).unwrap(),
            "\"无法计算相似度\""
        );
        assert_eq!(
            serde_json::to_string(&SentimentConfidence::High).unwrap(),
            "\"高\""
        );
    }

    #[test]
    fn test_request_validation_bounds() {
        let mut request = AnalysisRequest::new(AnalysisKind::Keywords, "测试文本");
        assert!(request.validate().is_ok());

        request.top_k = Some(0);
        assert!(request.validate().is_err());

        request.top_k = Some(1);
        assert!(request.validate().is_ok());

        let empty = AnalysisRequest::new(AnalysisKind::Sentiment, "");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_branch_serializes_untagged() {
        let ok: Branch<SummaryResult> = Branch::Value(SummaryResult {
            summary: "摘要".to_string(),
            length: 2,
            original_length: 2,
            compression_ratio: 1.0,
            method: AnalysisMethod::Traditional,
        });
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["summary"], "摘要");

        let err: Branch<SummaryResult> =
            Branch::from(Err(EngineError::ComputeError("boom".to_string())));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "compute_error");
        assert!(json["message"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_method_preference_default_is_auto() {
        assert_eq!(MethodPreference::default(), MethodPreference::Auto);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round3(0.999_999_9), 1.0);
        assert_eq!(round1(99.99), 100.0);
        assert_eq!(round2(7.0 / 3.0), 2.33);
    }
}
