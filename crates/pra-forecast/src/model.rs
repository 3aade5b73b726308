//! Least-squares linear model
//!
//! Fits `y = slope * x + intercept` against the position index of a
//! series. Fitting mutates shared state, so the engine treats fit+predict
//! as one atomic unit behind a lock.

use crate::error::ForecastError;

/// Simple linear regression over position indices
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearModel {
    slope: f64,
    intercept: f64,
    fitted: bool,
}

impl LinearModel {
    /// Create an unfitted model
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit against positions `0..values.len()`
    ///
    /// # Errors
    /// - `InsufficientData` below three points
    /// - `Degenerate` when the fit yields non-finite coefficients
    pub fn fit(&mut self, values: &[f64]) -> Result<(), ForecastError> {
        let n = values.len();
        if n < 3 {
            return Err(ForecastError::InsufficientData {
                points: n,
                required: 3,
            });
        }

        let mean_x = (n - 1) as f64 / 2.0;
        let mean_y = values.iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            cov += dx * (y - mean_y);
            var_x += dx * dx;
        }

        let slope = cov / var_x;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ForecastError::Degenerate(format!(
                "slope={slope}, intercept={intercept}"
            )));
        }

        self.slope = slope;
        self.intercept = intercept;
        self.fitted = true;
        Ok(())
    }

    /// Predict the value at position `x`
    ///
    /// # Errors
    /// `Unfitted` when called before a successful `fit`.
    pub fn predict(&self, x: f64) -> Result<f64, ForecastError> {
        if !self.fitted {
            return Err(ForecastError::Unfitted);
        }
        Ok(self.slope * x + self.intercept)
    }

    /// Fitted slope coefficient
    #[inline]
    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exact_line() {
        let mut model = LinearModel::new();
        model.fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((model.slope() - 2.0).abs() < 1e-12);
        assert!((model.predict(4.0).unwrap() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_has_zero_slope() {
        let mut model = LinearModel::new();
        model.fit(&[0.5, 0.5, 0.5]).unwrap();
        assert!(model.slope().abs() < 1e-12);
    }

    #[test]
    fn rejects_short_series() {
        let mut model = LinearModel::new();
        let err = model.fit(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { .. }));
    }

    #[test]
    fn predict_before_fit_is_an_error() {
        let model = LinearModel::new();
        assert!(matches!(model.predict(0.0), Err(ForecastError::Unfitted)));
    }
}
