//! Sentiment scoring engine
//!
//! Wraps the naive-Bayes classifier behind a load-or-create model
//! lifecycle and degrades to lexicon scoring on any prediction failure.
//! `predict` itself never fails outward.

use crate::classifier::NaiveBayesModel;
use crate::error::SentimentError;
use crate::lexicon::score_with_lexicon;
use crate::result::SentimentResult;
use std::path::{Path, PathBuf};

/// Model persistence lifecycle
///
/// Owns the on-disk location of a trained model. `load_or_create` returns
/// a working model on every path: a readable persisted model is reused,
/// anything else retrains from the demonstration corpus and persists the
/// fresh instance. No process-wide singleton is involved; construct one
/// lifecycle per engine (or per test).
#[derive(Debug, Clone)]
pub struct ModelLifecycle {
    path: PathBuf,
}

impl ModelLifecycle {
    /// Lifecycle for a model stored at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the model is persisted
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted model, or train and persist a fresh one
    pub fn load_or_create(&self) -> Result<NaiveBayesModel, SentimentError> {
        if self.path.exists() {
            match self.load() {
                Ok(model) => {
                    tracing::info!(path = %self.path.display(), "sentiment model loaded");
                    return Ok(model);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load sentiment model, retraining");
                }
            }
        }
        self.create()
    }

    fn load(&self) -> Result<NaiveBayesModel, SentimentError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| SentimentError::LoadFailed(e.to_string()))?;
        let model: NaiveBayesModel = serde_json::from_slice(&bytes)
            .map_err(|e| SentimentError::LoadFailed(e.to_string()))?;
        if !model.is_trained() {
            return Err(SentimentError::LoadFailed("persisted model is empty".to_string()));
        }
        Ok(model)
    }

    fn create(&self) -> Result<NaiveBayesModel, SentimentError> {
        let model = NaiveBayesModel::train_demo();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SentimentError::PersistFailed(e.to_string()))?;
        }
        let json = serde_json::to_vec(&model)
            .map_err(|e| SentimentError::PersistFailed(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| SentimentError::PersistFailed(e.to_string()))?;

        tracing::info!(path = %self.path.display(), "sentiment model created and saved");
        Ok(model)
    }
}

/// Sentiment scoring engine
///
/// Primary strategy is the trained classifier; any prediction error is
/// recovered locally with the lexicon fallback, so callers always receive
/// a usable [`SentimentResult`].
#[derive(Debug)]
pub struct SentimentEngine {
    model: NaiveBayesModel,
}

impl SentimentEngine {
    /// Construct an engine with a model persisted at `model_path`
    ///
    /// # Errors
    /// Fails only when the model can neither be loaded nor persisted.
    pub fn new(model_path: impl Into<PathBuf>) -> Result<Self, SentimentError> {
        let model = ModelLifecycle::new(model_path).load_or_create()?;
        Ok(Self { model })
    }

    /// Construct an engine around an already-trained model
    #[inline]
    #[must_use]
    pub fn with_model(model: NaiveBayesModel) -> Self {
        Self { model }
    }

    /// Score a single text
    ///
    /// Never fails: a classifier error routes the text through the lexicon.
    #[must_use]
    pub fn predict(&self, text: &str) -> SentimentResult {
        match self.model.predict(text) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(error = %e, "classifier unavailable, using lexicon fallback");
                score_with_lexicon(text)
            }
        }
    }

    /// Score a batch of texts, order-preserving
    ///
    /// Items are independent; no state is shared between predictions.
    #[must_use]
    pub fn batch_predict(&self, texts: &[&str]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.predict(t)).collect()
    }
}
