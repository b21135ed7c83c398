//! Sentiment aggregation core.
//!
//! Converts a sequence of per-item sentiment judgments into one aggregate
//! score/label/confidence plus a per-label tally. Every function here is a
//! pure projection of its input; results are recomputed, never mutated.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discrete sentiment classification attached to one comment or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Fixed per-label contribution to the aggregate score.
    fn weight(self) -> f64 {
        match self {
            SentimentLabel::Positive => 0.7,
            SentimentLabel::Negative => -0.7,
            SentimentLabel::Neutral => 0.0,
        }
    }

    /// Full-strength score for a single-item classification.
    fn unit_score(self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Negative => -1.0,
            SentimentLabel::Neutral => 0.0,
        }
    }
}

/// One sentiment judgment for one discrete item.
#[derive(Debug, Clone, Copy)]
pub struct SentimentJudgment {
    pub label: SentimentLabel,
    /// Per-item confidence when the upstream classifier supplies one.
    /// Not consumed by aggregation; the aggregate contribution is
    /// label-derived only.
    pub confidence: Option<f64>,
}

impl SentimentJudgment {
    pub fn new(label: SentimentLabel) -> Self {
        Self {
            label,
            confidence: None,
        }
    }
}

/// Overall sentiment summarizing a collection of judgments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct AggregateSentiment {
    /// Normalized score in [-1, 1].
    #[schema(example = 0.35)]
    pub score: f64,
    pub label: SentimentLabel,
    /// Share of judgments agreeing with the aggregate label, in [0, 1].
    #[schema(example = 0.75)]
    pub confidence: f64,
}

/// Per-label counts over the same judgment list as [`AggregateSentiment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentStats {
    pub total: u32,
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

/// Score above which the aggregate is labeled positive (exclusive).
const POSITIVE_THRESHOLD: f64 = 0.3;
/// Score below which the aggregate is labeled negative (exclusive).
const NEGATIVE_THRESHOLD: f64 = -0.3;

fn label_for_score(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Aggregates judgments into one overall sentiment.
///
/// Each judgment contributes +0.7 (positive), -0.7 (negative) or 0.0
/// (neutral) to a running sum; the score is the mean of those weights, 0 for
/// an empty sequence. Confidence is the proportion of judgments whose label
/// matches the aggregate label, 0 for an empty sequence.
pub fn aggregate(judgments: &[SentimentJudgment]) -> AggregateSentiment {
    if judgments.is_empty() {
        return AggregateSentiment {
            score: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        };
    }

    let sum: f64 = judgments.iter().map(|j| j.label.weight()).sum();
    let score = sum / judgments.len() as f64;
    let label = label_for_score(score);

    let agreeing = judgments.iter().filter(|j| j.label == label).count();
    let confidence = agreeing as f64 / judgments.len() as f64;

    AggregateSentiment {
        score,
        label,
        confidence,
    }
}

/// Counts each label over a judgment list.
pub fn tally(judgments: &[SentimentJudgment]) -> CommentStats {
    let mut stats = CommentStats {
        total: judgments.len() as u32,
        positive: 0,
        negative: 0,
        neutral: 0,
    };
    for judgment in judgments {
        match judgment.label {
            SentimentLabel::Positive => stats.positive += 1,
            SentimentLabel::Negative => stats.negative += 1,
            SentimentLabel::Neutral => stats.neutral += 1,
        }
    }
    stats
}

/// Wraps a single remote classification into the shared aggregate shape.
///
/// The single judgment is taken at full strength: +1 for positive, -1 for
/// negative, 0 for neutral, with the remote confidence passed through. This
/// lets the bulk-comment and single-text paths share one display model.
pub fn map_text_result(label: SentimentLabel, confidence: f64) -> AggregateSentiment {
    AggregateSentiment {
        score: label.unit_score(),
        label,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgments(labels: &[SentimentLabel]) -> Vec<SentimentJudgment> {
        labels.iter().copied().map(SentimentJudgment::new).collect()
    }

    #[test]
    fn empty_sequence_is_neutral_with_zero_score() {
        let result = aggregate(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn two_positive_one_negative_is_neutral() {
        // sum = 0.7 + 0.7 - 0.7 = 0.7, mean ~= 0.2333
        let js = judgments(&[
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Negative,
        ]);
        let result = aggregate(&js);
        assert!((result.score - 0.7 / 3.0).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn three_positive_one_negative_is_positive() {
        // mean = (2.1 - 0.7) / 4 = 0.35
        let js = judgments(&[
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Negative,
        ]);
        let result = aggregate(&js);
        assert!((result.score - 0.35).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn mean_of_exactly_point_three_stays_neutral() {
        // 3 positives and 4 neutrals: 2.1 / 7 = 0.3, boundary is exclusive
        let js = judgments(&[
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Neutral,
            SentimentLabel::Neutral,
            SentimentLabel::Neutral,
        ]);
        let result = aggregate(&js);
        assert!(result.score <= 0.3);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn mean_just_past_threshold_flips_label() {
        assert_eq!(label_for_score(0.31), SentimentLabel::Positive);
        assert_eq!(label_for_score(-0.31), SentimentLabel::Negative);
        assert_eq!(label_for_score(0.3), SentimentLabel::Neutral);
        assert_eq!(label_for_score(-0.3), SentimentLabel::Neutral);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let all_positive = judgments(&[SentimentLabel::Positive; 200]);
        let all_negative = judgments(&[SentimentLabel::Negative; 200]);
        for js in [&all_positive, &all_negative] {
            let result = aggregate(js);
            assert!(result.score >= -1.0 && result.score <= 1.0);
            assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        }
    }

    #[test]
    fn per_item_confidence_does_not_affect_the_score() {
        let js = vec![
            SentimentJudgment {
                label: SentimentLabel::Positive,
                confidence: Some(0.1),
            },
            SentimentJudgment {
                label: SentimentLabel::Positive,
                confidence: None,
            },
        ];
        let result = aggregate(&js);
        assert!((result.score - 0.7).abs() < 1e-12);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn tally_counts_sum_to_total() {
        let js = judgments(&[
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
        ]);
        let stats = tally(&js);
        assert_eq!(stats.total as usize, js.len());
        assert_eq!(stats.positive + stats.negative + stats.neutral, stats.total);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.negative, 1);
        assert_eq!(stats.neutral, 2);
    }

    #[test]
    fn unanimous_judgments_give_full_confidence() {
        let js = judgments(&[SentimentLabel::Positive; 5]);
        let result = aggregate(&js);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn single_negative_text_maps_to_unit_score() {
        let result = map_text_result(SentimentLabel::Negative, 0.9);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.confidence, 0.9);
    }
}
