//! Lexicon sentiment fallback
//!
//! Pure, deterministic scoring used when the classifier cannot predict.
//! Counts case-insensitive substring membership of three named word sets,
//! applies contextual adjustments, and normalizes into a distribution with
//! a floor of 0.10 on the neutral component.

use crate::result::SentimentResult;

/// Vocabulary covering success, growth, quality, investment and
/// infrastructure reporting.
pub const POSITIVE_WORDS: &[&str] = &[
    // Success & growth
    "success",
    "successful",
    "growth",
    "growing",
    "expansion",
    "increase",
    "rising",
    "gains",
    "profit",
    "revenue",
    "milestone",
    "achievement",
    "breakthrough",
    "innovation",
    "progress",
    "improvement",
    "advance",
    "boost",
    "surge",
    "soar",
    "record",
    "peak",
    "high",
    // Quality & performance
    "excellent",
    "outstanding",
    "exceptional",
    "impressive",
    "strong",
    "robust",
    "solid",
    "good",
    "great",
    "positive",
    "optimistic",
    "confident",
    "favorable",
    "promising",
    "effective",
    "efficient",
    "productive",
    "valuable",
    "beneficial",
    "advantage",
    // Development & investment
    "development",
    "investment",
    "funding",
    "capital",
    "initiative",
    "launch",
    "unveil",
    "opportunity",
    "potential",
    "prospects",
    "momentum",
    "confidence",
    "optimism",
    // Infrastructure & quality of life
    "modernization",
    "upgrade",
    "enhancement",
    "infrastructure",
    "facilities",
    "connectivity",
    "accessibility",
    "sustainable",
    "green",
    "clean",
    "eco-friendly",
];

/// Vocabulary covering decline, risk and crisis reporting.
pub const NEGATIVE_WORDS: &[&str] = &[
    // Problems & decline
    "decline",
    "decrease",
    "fall",
    "drop",
    "plunge",
    "crash",
    "collapse",
    "failure",
    "loss",
    "losses",
    "deficit",
    "debt",
    "crisis",
    "recession",
    "downturn",
    "slump",
    "weak",
    "poor",
    "disappointing",
    "missed",
    "below",
    "underperform",
    // Challenges & issues
    "concern",
    "concerns",
    "worry",
    "worries",
    "risk",
    "risks",
    "threat",
    "challenge",
    "problem",
    "problems",
    "issue",
    "issues",
    "difficulty",
    "struggle",
    "setback",
    "delay",
    "postpone",
    "cancel",
    "suspend",
    "halt",
    "stop",
    // Negative conditions
    "pollution",
    "congestion",
    "corruption",
    "scandal",
    "controversy",
    "violation",
    "shortage",
    "scarcity",
    "emergency",
    "disaster",
    "damage",
    "bad",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "negative",
    "criticism",
];

/// Hedging and attribution vocabulary signalling balanced coverage.
pub const NEUTRAL_MODIFIERS: &[&str] = &[
    "mixed",
    "varied",
    "stable",
    "steady",
    "unchanged",
    "maintained",
    "continued",
    "moderate",
    "gradual",
    "cautious",
    "awaiting",
    "expected",
    "projected",
    "analysts",
    "experts",
    "officials",
    "sources",
    "reports",
    "according",
];

/// Contrastive markers: their presence indicates mixed sentiment.
const CONTRASTIVE_MARKERS: &[&str] = &["despite", "however", "but"];

/// Score text with the lexicon
///
/// Deterministic: the same text always yields the same distribution.
#[must_use]
pub fn score_with_lexicon(text: &str) -> SentimentResult {
    let text_lower = text.to_lowercase();

    let count = |words: &[&str]| -> usize {
        words.iter().filter(|w| text_lower.contains(*w)).count()
    };

    let mut pos_count = count(POSITIVE_WORDS);
    let mut neg_count = count(NEGATIVE_WORDS);
    let mut neutral_count = count(NEUTRAL_MODIFIERS);

    // Contrastive markers signal mixed sentiment
    if CONTRASTIVE_MARKERS.iter().any(|m| text_lower.contains(m)) {
        neutral_count += 2;
    }

    // "record high"/"record growth" is a strong positive signal
    if text_lower.contains("record")
        && (text_lower.contains("high") || text_lower.contains("growth"))
    {
        pos_count += 2;
    }

    // Market downturn phrasing
    if text_lower.contains("sharp correction") || text_lower.contains("profit-taking") {
        neg_count += 1;
    }

    let total = (pos_count + neg_count + neutral_count).max(1) as f64;

    let pos_prob = pos_count as f64 / total;
    let neg_prob = neg_count as f64 / total;
    // Floor so plain factual text never reads as fully polarized
    let neutral_prob = (neutral_count as f64 / total).max(0.1);

    let sum = pos_prob + neg_prob + neutral_prob;
    let (pos_prob, neutral_prob, neg_prob) = if sum > 0.0 {
        (pos_prob / sum, neutral_prob / sum, neg_prob / sum)
    } else {
        (0.33, 0.34, 0.33)
    };

    SentimentResult::from_distribution(pos_prob, neutral_prob, neg_prob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SentimentLabel;

    #[test]
    fn word_sets_are_disjoint() {
        for word in POSITIVE_WORDS {
            assert!(!NEGATIVE_WORDS.contains(word), "{word} in both sets");
            assert!(!NEUTRAL_MODIFIERS.contains(word), "{word} in both sets");
        }
        for word in NEGATIVE_WORDS {
            assert!(!NEUTRAL_MODIFIERS.contains(word), "{word} in both sets");
        }
    }

    #[test]
    fn positive_text_scores_positive() {
        let result =
            score_with_lexicon("Record growth and strong revenue gains mark a major milestone");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.positive + result.neutral + result.negative - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_text_scores_negative() {
        let result = score_with_lexicon("Crisis deepens as losses mount and debt concerns grow");
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn contrastive_marker_boosts_neutral() {
        let plain = score_with_lexicon("profit surge");
        let hedged = score_with_lexicon("profit surge, however analysts remain cautious");
        assert!(hedged.neutral > plain.neutral);
    }

    #[test]
    fn empty_text_hits_neutral_floor() {
        let result = score_with_lexicon("");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert!((result.positive + result.neutral + result.negative - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scoring_is_idempotent() {
        let text = "Despite record growth, analysts expect a sharp correction";
        let first = score_with_lexicon(text);
        let second = score_with_lexicon(text);
        assert_eq!(first, second);
    }

    #[test]
    fn distribution_is_valid_for_arbitrary_text() {
        for text in [
            "the quick brown fox",
            "record high profits despite weak outlook",
            "??!!",
        ] {
            let r = score_with_lexicon(text);
            assert!((r.positive + r.neutral + r.negative - 1.0).abs() < 1e-6);
            for p in [r.positive, r.neutral, r.negative] {
                assert!((0.0..=1.0).contains(&p));
            }
            assert_eq!(r.confidence, r.positive.max(r.neutral).max(r.negative));
        }
    }
}
