//! Lexicon-based sentiment scoring.
//!
//! Bag-of-words polarity over segmented tokens: polar hits are weighted by a
//! preceding intensifier and flipped by a preceding negator, then smoothed
//! into a score in [0, 1] centered on 0.5.

use std::collections::HashSet;

use crate::models::{
    round3, AnalysisMethod, SentimentConfidence, SentimentLabel, SentimentResult,
};

use super::segment;

const POSITIVE_WORDS: &[&str] = &[
    "好", "很好", "不错", "喜欢", "喜爱", "爱", "棒", "优秀", "满意", "开心", "高兴", "快乐",
    "幸福", "赞", "点赞", "给力", "周到", "出色", "精彩", "完美", "优质", "耐用", "实惠",
    "推荐", "惊喜", "舒适", "舒服", "方便", "快捷", "友好", "热情", "专业", "可靠", "美丽",
    "漂亮", "感谢", "谢谢", "支持", "顺利", "清晰", "流畅", "超值", "良好", "先进", "强大",
    "丰富", "成功", "进步", "提升", "愉快", "贴心", "细心", "迅速", "及时", "称赞", "好评",
    "物美价廉", "货真价实", "名不虚传",
];

const NEGATIVE_WORDS: &[&str] = &[
    // The segmenter emits fused negations as single tokens, so they live in
    // the lexicon rather than the negator list.
    "不好", "不行", "不满", "不满意",
    "差", "坏", "烂", "糟糕", "糟心", "失望", "讨厌", "恨", "垃圾", "难用", "难看", "难过",
    "伤心", "生气", "愤怒", "郁闷", "烦", "烦躁", "慢", "卡顿", "劣质", "破损", "缺陷",
    "故障", "错误", "投诉", "退货", "欺骗", "虚假", "敷衍", "拖延", "粗糙", "昂贵", "坑",
    "后悔", "无语", "崩溃", "差劲", "恶心", "冷漠", "傲慢", "迟钝", "漏洞", "缺货", "损坏",
    "脏", "吵", "刺耳", "差评", "上当", "货不对板",
];

const INTENSIFIERS: &[&str] = &[
    "非常", "很", "太", "特别", "超级", "极其", "十分", "格外", "相当", "真", "最", "更",
];

const NEGATORS: &[&str] = &["不", "没", "没有", "别", "勿", "毫不", "并不", "不太"];

/// Score above which text classifies as positive.
const POSITIVE_THRESHOLD: f64 = 0.6;
/// Score below which text classifies as negative.
const NEGATIVE_THRESHOLD: f64 = 0.4;
/// Distance from neutral beyond which confidence is high.
const HIGH_CONFIDENCE_MARGIN: f64 = 0.2;

/// Weight multiplier applied to a polar hit preceded by an intensifier.
const INTENSIFIER_BOOST: f64 = 2.0;

/// Lexicon polarity scorer.
pub struct SentimentScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
    negators: HashSet<&'static str>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    /// Continuous polarity score in [0, 1]; 0.5 is neutral.
    ///
    /// `(pos - neg) / (pos + neg + 1)` keeps the score strictly inside the
    /// interval and pulls low-evidence texts toward neutral.
    pub fn score(&self, text: &str) -> f64 {
        let mut positive_weight = 0.0_f64;
        let mut negative_weight = 0.0_f64;
        let mut negated = false;
        let mut boost = 1.0_f64;

        for token in segment::words(text) {
            // Modifier scope ends at clause punctuation.
            if !token.chars().any(char::is_alphanumeric) {
                negated = false;
                boost = 1.0;
                continue;
            }

            if self.negators.contains(token) {
                negated = !negated;
                continue;
            }
            if self.intensifiers.contains(token) {
                boost = INTENSIFIER_BOOST;
                continue;
            }

            if self.positive.contains(token) {
                if negated {
                    negative_weight += boost;
                } else {
                    positive_weight += boost;
                }
            } else if self.negative.contains(token) {
                if negated {
                    positive_weight += boost;
                } else {
                    negative_weight += boost;
                }
            } else {
                continue;
            }

            negated = false;
            boost = 1.0;
        }

        0.5 + 0.5 * (positive_weight - negative_weight)
            / (positive_weight + negative_weight + 1.0)
    }

    /// Classify text into the full sentiment result.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let score = self.score(text);
        SentimentResult {
            sentiment: label_for(score),
            score: round3(score),
            confidence: confidence_for(score),
            method: AnalysisMethod::Traditional,
        }
    }
}

/// Threshold classification: > 0.6 positive, < 0.4 negative, else neutral.
pub fn label_for(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// High confidence beyond 0.2 from neutral, medium otherwise.
///
/// This path never emits low confidence; only the LLM method reports it.
pub fn confidence_for(score: f64) -> SentimentConfidence {
    if (score - 0.5).abs() > HIGH_CONFIDENCE_MARGIN {
        SentimentConfidence::High
    } else {
        SentimentConfidence::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_always_in_bounds() {
        let scorer = SentimentScorer::new();
        for text in [
            "非常好非常好非常好",
            "垃圾垃圾垃圾差差差",
            "今天星期三",
            "好",
            "差",
        ] {
            let score = scorer.score(text);
            assert!((0.0..=1.0).contains(&score), "score {score} for {text}");
            assert!(score.is_finite());
        }
    }

    #[test]
    fn test_positive_review() {
        let scorer = SentimentScorer::new();
        let result = scorer.analyze("我非常喜欢这个产品，质量很好，服务也很周到。");
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert!(result.score > 0.6, "score was {}", result.score);
        assert_eq!(result.confidence, SentimentConfidence::High);
        assert_eq!(result.method, AnalysisMethod::Traditional);
    }

    #[test]
    fn test_negative_review() {
        let scorer = SentimentScorer::new();
        let result = scorer.analyze("质量太差了，非常失望，再也不会购买。");
        assert_eq!(result.sentiment, SentimentLabel::Negative);
        assert!(result.score < 0.4, "score was {}", result.score);
    }

    #[test]
    fn test_neutral_text() {
        let scorer = SentimentScorer::new();
        let result = scorer.analyze("今天是星期三，他们下午去了图书馆。");
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        assert_eq!(result.confidence, SentimentConfidence::Medium);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score("我喜欢这个产品");
        let negated = scorer.score("我不喜欢这个产品");
        assert!(plain > 0.6);
        assert!(negated < 0.4, "negated score was {negated}");
    }

    #[test]
    fn test_fused_negation_token() {
        let scorer = SentimentScorer::new();
        let result = scorer.analyze("这个产品不好");
        assert_eq!(result.sentiment, SentimentLabel::Negative);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let scorer = SentimentScorer::new();
        let plain = scorer.score("质量好");
        let boosted = scorer.score("质量非常好");
        assert!(boosted > plain);
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(label_for(0.7), SentimentLabel::Positive);
        assert_eq!(label_for(0.3), SentimentLabel::Negative);
        assert_eq!(label_for(0.5), SentimentLabel::Neutral);
        // Boundary values are neutral, not positive/negative.
        assert_eq!(label_for(0.6), SentimentLabel::Neutral);
        assert_eq!(label_for(0.4), SentimentLabel::Neutral);
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(confidence_for(0.75), SentimentConfidence::High);
        assert_eq!(confidence_for(0.25), SentimentConfidence::High);
        assert_eq!(confidence_for(0.65), SentimentConfidence::Medium);
        assert_eq!(confidence_for(0.5), SentimentConfidence::Medium);
    }
}
