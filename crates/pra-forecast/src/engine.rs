//! Forecast engine
//!
//! `predict_trend` extrapolates a score series; `forecast_sentiment`
//! renders the extrapolation of a sentiment history as a short
//! human-readable description.

use crate::error::ForecastError;
use crate::model::LinearModel;
use parking_lot::Mutex;
use pra_sentiment::SentimentResult;
use serde::{Deserialize, Serialize};

/// Slope magnitude below which a trend reads as stable
const SLOPE_THRESHOLD: f64 = 0.01;

/// Coarse three-way classification of a fitted slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    /// Slope above the threshold
    Improving,
    /// Slope within the threshold band
    Stable,
    /// Slope below the negative threshold
    Declining,
}

impl TrendLabel {
    /// String form used in forecast descriptions
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Improving => "improving",
            TrendLabel::Stable => "stable",
            TrendLabel::Declining => "declining",
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend forecast engine
///
/// Holds one shared regression model; fit+predict runs as an atomic unit
/// behind a mutex since fitting mutates model state.
#[derive(Debug, Default)]
pub struct TrendForecastEngine {
    model: Mutex<LinearModel>,
}

impl TrendForecastEngine {
    /// Create a new engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extrapolate a score series `horizon` steps forward
    ///
    /// With fewer than three points there is no statistical basis for a
    /// slope: the result is `horizon` copies of the input mean (0.5 for an
    /// empty series) labeled stable. The same flat policy recovers any
    /// internal fit failure. Predictions are clipped to `[0, 1]`.
    #[must_use]
    pub fn predict_trend(&self, scores: &[f64], horizon: usize) -> (Vec<f64>, TrendLabel) {
        if scores.len() < 3 {
            return flat_forecast(scores, horizon);
        }

        let mut model = self.model.lock();
        if let Err(e) = model.fit(scores) {
            tracing::warn!(error = %e, "trend fit failed, using flat forecast");
            return flat_forecast(scores, horizon);
        }

        let start = scores.len();
        let mut predictions = Vec::with_capacity(horizon);
        for offset in 0..horizon {
            match model.predict((start + offset) as f64) {
                Ok(value) => predictions.push(value.clamp(0.0, 1.0)),
                Err(e) => {
                    tracing::warn!(error = %e, "trend predict failed, using flat forecast");
                    return flat_forecast(scores, horizon);
                }
            }
        }

        let slope = model.slope();
        let label = if slope > SLOPE_THRESHOLD {
            TrendLabel::Improving
        } else if slope < -SLOPE_THRESHOLD {
            TrendLabel::Declining
        } else {
            TrendLabel::Stable
        };

        (predictions, label)
    }

    /// Describe the forecast of a sentiment history
    ///
    /// Extracts the positive-probability series, extrapolates it, and
    /// renders one of three fixed templates keyed by the trend label.
    #[must_use]
    pub fn forecast_sentiment(&self, history: &[SentimentResult], horizon: usize) -> String {
        if history.is_empty() {
            return "Insufficient data for reliable trend forecasting.".to_string();
        }

        let scores: Vec<f64> = history.iter().map(|s| s.positive).collect();
        let (predictions, trend) = self.predict_trend(&scores, horizon);

        let current_window = if scores.len() >= 3 {
            &scores[scores.len() - 3..]
        } else {
            &scores[..]
        };
        let current_avg = mean(current_window);
        let future_avg = mean(&predictions);

        let change_pct = if current_avg > 0.0 {
            (future_avg - current_avg) / current_avg * 100.0
        } else {
            0.0
        };

        let mut description = format!(
            "Based on recent sentiment analysis, the trend is **{trend}**. "
        );
        match trend {
            TrendLabel::Improving => {
                description.push_str(&format!(
                    "Sentiment is expected to improve by approximately {:.1}% \
                     over the next {horizon} days. Positive outlook.",
                    change_pct.abs()
                ));
            }
            TrendLabel::Declining => {
                description.push_str(&format!(
                    "Sentiment is expected to decline by approximately {:.1}% \
                     over the next {horizon} days. Caution advised.",
                    change_pct.abs()
                ));
            }
            TrendLabel::Stable => {
                description.push_str(&format!(
                    "Sentiment is expected to remain relatively stable \
                     over the next {horizon} days."
                ));
            }
        }

        description
    }
}

fn flat_forecast(scores: &[f64], horizon: usize) -> (Vec<f64>, TrendLabel) {
    let avg = if scores.is_empty() { 0.5 } else { mean(scores) };
    (vec![avg; horizon], TrendLabel::Stable)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pra_sentiment::SentimentResult;

    fn history(positives: &[f64]) -> Vec<SentimentResult> {
        positives
            .iter()
            .map(|&p| {
                let rest = (1.0 - p) / 2.0;
                SentimentResult::from_distribution(p, rest, rest)
            })
            .collect()
    }

    #[test]
    fn short_series_is_flat_at_mean() {
        let engine = TrendForecastEngine::new();
        let (predictions, label) = engine.predict_trend(&[0.4, 0.6], 7);

        assert_eq!(predictions, vec![0.5; 7]);
        assert_eq!(label, TrendLabel::Stable);
    }

    #[test]
    fn empty_series_is_flat_at_half() {
        let engine = TrendForecastEngine::new();
        let (predictions, label) = engine.predict_trend(&[], 5);

        assert_eq!(predictions, vec![0.5; 5]);
        assert_eq!(label, TrendLabel::Stable);
    }

    #[test]
    fn increasing_series_improves() {
        let engine = TrendForecastEngine::new();
        let (predictions, label) = engine.predict_trend(&[0.2, 0.4, 0.6, 0.8], 3);

        assert_eq!(label, TrendLabel::Improving);
        assert_eq!(predictions.len(), 3);
        for p in &predictions {
            assert!((0.0..=1.0).contains(p));
        }
        // Predictions run off the end of the fitted line, clipped at 1.0
        assert!(predictions[0] >= 0.8);
    }

    #[test]
    fn decreasing_series_declines() {
        let engine = TrendForecastEngine::new();
        let (_, label) = engine.predict_trend(&[0.9, 0.7, 0.5, 0.3], 3);
        assert_eq!(label, TrendLabel::Declining);
    }

    #[test]
    fn constant_series_is_stable() {
        let engine = TrendForecastEngine::new();
        let (predictions, label) = engine.predict_trend(&[0.5, 0.5, 0.5, 0.5], 4);

        assert_eq!(label, TrendLabel::Stable);
        for p in predictions {
            assert!((p - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn predictions_are_clipped() {
        let engine = TrendForecastEngine::new();
        let (predictions, _) = engine.predict_trend(&[0.5, 0.7, 0.9], 10);
        for p in predictions {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn forecast_length_matches_horizon() {
        let engine = TrendForecastEngine::new();
        for horizon in [1, 7, 30] {
            let (predictions, _) = engine.predict_trend(&[0.1, 0.2, 0.3], horizon);
            assert_eq!(predictions.len(), horizon);
        }
    }

    #[test]
    fn improving_description_names_horizon_and_change() {
        let engine = TrendForecastEngine::new();
        let text = engine.forecast_sentiment(&history(&[0.2, 0.4, 0.6, 0.8]), 7);

        assert!(text.contains("**improving**"));
        assert!(text.contains("next 7 days"));
        assert!(text.contains('%'));
    }

    #[test]
    fn declining_description_advises_caution() {
        let engine = TrendForecastEngine::new();
        let text = engine.forecast_sentiment(&history(&[0.9, 0.7, 0.5, 0.3]), 7);

        assert!(text.contains("**declining**"));
        assert!(text.contains("Caution advised."));
    }

    #[test]
    fn stable_description_has_no_percentage() {
        let engine = TrendForecastEngine::new();
        let text = engine.forecast_sentiment(&history(&[0.5, 0.5, 0.5, 0.5]), 7);

        assert!(text.contains("**stable**"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn empty_history_reports_insufficient_data() {
        let engine = TrendForecastEngine::new();
        let text = engine.forecast_sentiment(&[], 7);
        assert_eq!(text, "Insufficient data for reliable trend forecasting.");
    }
}
