//! Error types for trend forecasting

/// Errors raised by the regression model
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Too few points for a statistically meaningful fit
    #[error("insufficient data: {points} points, need at least {required}")]
    InsufficientData {
        /// Points supplied
        points: usize,
        /// Minimum required
        required: usize,
    },

    /// The fit produced a non-finite coefficient
    #[error("regression degenerated: {0}")]
    Degenerate(String),

    /// Model used before fitting
    #[error("model is unfitted")]
    Unfitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ForecastError::InsufficientData {
            points: 2,
            required: 3,
        };
        assert!(err.to_string().contains("insufficient data"));
    }
}
