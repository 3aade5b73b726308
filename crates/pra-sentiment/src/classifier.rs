//! Naive-Bayes text classifier
//!
//! A multinomial naive-Bayes model over unigram and bigram tokens,
//! trained on a fixed five-document demonstration corpus. This is not a
//! general training system: the corpus is a stand-in that gives the
//! engine a working statistical strategy to degrade from.

use crate::error::SentimentError;
use crate::result::SentimentResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Class index order: negative, neutral, positive
const CLASS_COUNT: usize = 3;

/// Demonstration corpus with per-document class labels
pub const DEMO_CORPUS: &[(&str, SentimentClass)] = &[
    ("excellent great amazing wonderful fantastic", SentimentClass::Positive),
    ("terrible awful horrible bad worst", SentimentClass::Negative),
    ("good nice positive happy satisfied", SentimentClass::Positive),
    ("poor negative disappointed unhappy", SentimentClass::Negative),
    ("okay average neutral fine normal", SentimentClass::Neutral),
];

/// Training class for the demonstration corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentClass {
    /// Index 0
    Negative,
    /// Index 1
    Neutral,
    /// Index 2
    Positive,
}

impl SentimentClass {
    #[inline]
    fn index(self) -> usize {
        match self {
            SentimentClass::Negative => 0,
            SentimentClass::Neutral => 1,
            SentimentClass::Positive => 2,
        }
    }
}

/// Multinomial naive-Bayes model with Laplace smoothing
///
/// Serializable so a trained instance can be persisted and reloaded by the
/// engine's model lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// Token occurrence counts per class
    token_counts: HashMap<String, [u64; CLASS_COUNT]>,
    /// Documents seen per class
    doc_counts: [u64; CLASS_COUNT],
    /// Total token occurrences per class
    token_totals: [u64; CLASS_COUNT],
}

impl NaiveBayesModel {
    /// Create an untrained model
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Train on the fixed demonstration corpus
    #[must_use]
    pub fn train_demo() -> Self {
        let mut model = Self::new();
        for (text, class) in DEMO_CORPUS {
            model.observe(text, *class);
        }
        model
    }

    /// Add one labeled document to the model
    pub fn observe(&mut self, text: &str, class: SentimentClass) {
        let idx = class.index();
        self.doc_counts[idx] += 1;
        for token in tokenize(text) {
            self.token_totals[idx] += 1;
            self.token_counts.entry(token).or_default()[idx] += 1;
        }
    }

    /// Whether the model has seen any training data
    #[inline]
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.doc_counts.iter().sum::<u64>() > 0
    }

    /// Number of distinct tokens in the vocabulary
    #[inline]
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.token_counts.len()
    }

    /// Predict the class distribution for a text
    ///
    /// # Errors
    /// - `SentimentError::Untrained` when no documents were observed
    /// - `SentimentError::NoRecognizedTokens` when the text shares no
    ///   vocabulary with the corpus — a priors-only prediction carries no
    ///   signal, so the caller should fall back to the lexicon
    pub fn predict(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        if !self.is_trained() {
            return Err(SentimentError::Untrained);
        }

        let known: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| self.token_counts.contains_key(t))
            .collect();
        if known.is_empty() {
            return Err(SentimentError::NoRecognizedTokens);
        }

        let total_docs = self.doc_counts.iter().sum::<u64>() as f64;
        let vocab = self.vocabulary_size() as f64;

        let mut log_probs = [0.0f64; CLASS_COUNT];
        for (idx, log_prob) in log_probs.iter_mut().enumerate() {
            *log_prob = (self.doc_counts[idx] as f64 / total_docs).max(f64::MIN_POSITIVE).ln();
            for token in &known {
                let count = self.token_counts[token][idx] as f64;
                let likelihood = (count + 1.0) / (self.token_totals[idx] as f64 + vocab);
                *log_prob += likelihood.ln();
            }
        }

        // Softmax in log space for numeric stability
        let max = log_probs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = log_probs.iter().map(|lp| (lp - max).exp()).collect();
        let sum: f64 = exp.iter().sum();

        let negative = exp[0] / sum;
        let neutral = exp[1] / sum;
        let positive = exp[2] / sum;

        Ok(SentimentResult::from_distribution(positive, neutral, negative))
    }
}

/// Lowercased unigrams plus adjacent bigrams
fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    let mut tokens = words.clone();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SentimentLabel;

    #[test]
    fn demo_model_classifies_corpus_vocabulary() {
        let model = NaiveBayesModel::train_demo();

        let result = model.predict("excellent wonderful launch").unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);

        let result = model.predict("terrible awful quarter").unwrap();
        assert_eq!(result.label, SentimentLabel::Negative);

        let result = model.predict("an average normal day").unwrap();
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn prediction_is_a_distribution() {
        let model = NaiveBayesModel::train_demo();
        let r = model.predict("good results").unwrap();
        assert!((r.positive + r.neutral + r.negative - 1.0).abs() < 1e-6);
        for p in [r.positive, r.neutral, r.negative] {
            assert!((0.0..=1.0).contains(&p));
        }
        assert_eq!(r.confidence, r.positive.max(r.neutral).max(r.negative));
    }

    #[test]
    fn unknown_vocabulary_is_an_error() {
        let model = NaiveBayesModel::train_demo();
        let err = model.predict("zyx qwv").unwrap_err();
        assert!(matches!(err, SentimentError::NoRecognizedTokens));
    }

    #[test]
    fn untrained_model_is_an_error() {
        let model = NaiveBayesModel::new();
        let err = model.predict("good").unwrap_err();
        assert!(matches!(err, SentimentError::Untrained));
    }

    #[test]
    fn roundtrips_through_json() {
        let model = NaiveBayesModel::train_demo();
        let json = serde_json::to_string(&model).unwrap();
        let restored: NaiveBayesModel = serde_json::from_str(&json).unwrap();

        let a = model.predict("good nice").unwrap();
        let b = restored.predict("good nice").unwrap();
        assert_eq!(a, b);
    }
}
