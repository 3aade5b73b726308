//! Sentiment scoring engine
//!
//! Scores free text into a probability distribution over
//! {negative, neutral, positive}:
//! - Primary strategy: a small naive-Bayes classifier trained once on a
//!   fixed demonstration corpus and persisted between runs
//! - Fallback strategy: deterministic lexicon scoring, used whenever the
//!   classifier cannot produce a prediction
//!
//! Either strategy yields a [`SentimentResult`] whose three components sum
//! to one. Per-item results aggregate into an [`AggregateSentiment`] by
//! component-wise averaging.

#![warn(unreachable_pub)]

pub mod classifier;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod result;

pub use classifier::NaiveBayesModel;
pub use engine::{ModelLifecycle, SentimentEngine};
pub use error::SentimentError;
pub use lexicon::score_with_lexicon;
pub use result::{AggregateSentiment, SentimentLabel, SentimentResult};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
