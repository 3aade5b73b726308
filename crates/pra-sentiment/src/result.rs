//! Sentiment result types
//!
//! A [`SentimentResult`] is a probability distribution over the three
//! sentiment classes together with the derived label and confidence.
//! [`AggregateSentiment`] is the component-wise mean of a batch of results
//! with the label and confidence re-derived from the averaged vector.

use serde::{Deserialize, Serialize};

/// Three-way sentiment classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Predominantly positive text
    Positive,
    /// Predominantly neutral or mixed text
    Neutral,
    /// Predominantly negative text
    Negative,
}

impl SentimentLabel {
    /// String form used in reports and stored records
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-text sentiment distribution
///
/// Invariant: `positive + neutral + negative` sums to one (within floating
/// tolerance), each component lies in `[0, 1]`, `label` is the argmax of the
/// three components and `confidence` is the winning probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Probability of the positive class
    pub positive: f64,
    /// Probability of the neutral class
    pub neutral: f64,
    /// Probability of the negative class
    pub negative: f64,
    /// Winning class
    pub label: SentimentLabel,
    /// Probability of the winning class
    pub confidence: f64,
}

impl SentimentResult {
    /// Build a result from a raw distribution, deriving label and confidence
    ///
    /// Ties resolve with priority positive > negative > neutral.
    #[must_use]
    pub fn from_distribution(positive: f64, neutral: f64, negative: f64) -> Self {
        let (label, confidence) = derive_label(positive, neutral, negative);
        Self {
            positive,
            neutral,
            negative,
            label,
            confidence,
        }
    }
}

/// Aggregate sentiment over a batch of per-item results
///
/// Each component is the arithmetic mean of the inputs' same component.
/// The label and confidence are re-derived from the averaged vector, so
/// `confidence` is the winning averaged probability, not the mean of the
/// inputs' confidences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSentiment {
    /// Mean probability of the positive class
    pub positive: f64,
    /// Mean probability of the neutral class
    pub neutral: f64,
    /// Mean probability of the negative class
    pub negative: f64,
    /// Winning class of the averaged vector
    pub overall: SentimentLabel,
    /// Winning averaged probability
    pub confidence: f64,
}

impl AggregateSentiment {
    /// Aggregate a batch of results by component-wise mean
    ///
    /// An empty batch yields the neutral default distribution.
    #[must_use]
    pub fn from_results(results: &[SentimentResult]) -> Self {
        if results.is_empty() {
            return Self {
                positive: 0.33,
                neutral: 0.34,
                negative: 0.33,
                overall: SentimentLabel::Neutral,
                confidence: 0.34,
            };
        }

        let n = results.len() as f64;
        let positive = results.iter().map(|r| r.positive).sum::<f64>() / n;
        let neutral = results.iter().map(|r| r.neutral).sum::<f64>() / n;
        let negative = results.iter().map(|r| r.negative).sum::<f64>() / n;

        let (overall, confidence) = derive_label(positive, neutral, negative);
        Self {
            positive,
            neutral,
            negative,
            overall,
            confidence,
        }
    }
}

/// Argmax with tie priority positive > negative > neutral
fn derive_label(positive: f64, neutral: f64, negative: f64) -> (SentimentLabel, f64) {
    let max = positive.max(neutral).max(negative);
    if positive == max {
        (SentimentLabel::Positive, positive)
    } else if negative == max {
        (SentimentLabel::Negative, negative)
    } else {
        (SentimentLabel::Neutral, neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_derivation_is_argmax() {
        let result = SentimentResult::from_distribution(0.7, 0.2, 0.1);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.7);

        let result = SentimentResult::from_distribution(0.1, 0.2, 0.7);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.confidence, 0.7);

        let result = SentimentResult::from_distribution(0.1, 0.8, 0.1);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn tie_prefers_positive_then_negative() {
        let result = SentimentResult::from_distribution(0.4, 0.2, 0.4);
        assert_eq!(result.label, SentimentLabel::Positive);

        let result = SentimentResult::from_distribution(0.2, 0.4, 0.4);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn aggregate_is_component_wise_mean() {
        let results = vec![
            SentimentResult::from_distribution(0.8, 0.1, 0.1),
            SentimentResult::from_distribution(0.4, 0.3, 0.3),
        ];

        let agg = AggregateSentiment::from_results(&results);
        assert!((agg.positive - 0.6).abs() < 1e-12);
        assert!((agg.neutral - 0.2).abs() < 1e-12);
        assert!((agg.negative - 0.2).abs() < 1e-12);
        assert_eq!(agg.overall, SentimentLabel::Positive);
        assert!((agg.confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn aggregate_confidence_is_winning_averaged_probability() {
        // Two confident but opposed results: the averaged winner's
        // probability differs from the mean of the input confidences.
        let results = vec![
            SentimentResult::from_distribution(0.9, 0.1, 0.0),
            SentimentResult::from_distribution(0.0, 0.4, 0.6),
        ];

        let agg = AggregateSentiment::from_results(&results);
        assert_eq!(agg.overall, SentimentLabel::Positive);
        assert!((agg.confidence - 0.45).abs() < 1e-12);
        // mean of confidences would have been 0.75
        assert!((agg.confidence - 0.75).abs() > 0.1);
    }

    #[test]
    fn empty_aggregate_defaults_to_neutral() {
        let agg = AggregateSentiment::from_results(&[]);
        assert_eq!(agg.overall, SentimentLabel::Neutral);
        assert!((agg.positive + agg.neutral + agg.negative - 1.0).abs() < 1e-9);
        assert_eq!(agg.confidence, 0.34);
    }
}
