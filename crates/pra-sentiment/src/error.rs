//! Error types for sentiment scoring

/// Errors raised by the sentiment engine and its classifier
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    /// Persisted model could not be read
    #[error("model load failed: {0}")]
    LoadFailed(String),

    /// Model could not be written to storage
    #[error("model persist failed: {0}")]
    PersistFailed(String),

    /// Model has not been trained
    #[error("model is untrained")]
    Untrained,

    /// Input shares no vocabulary with the training corpus
    #[error("no recognized tokens in input")]
    NoRecognizedTokens,

    /// Training input was inconsistent
    #[error("invalid training data: {0}")]
    InvalidTrainingData(String),
}
