//! General-purpose z-score anomaly detection
//!
//! Used outside the tabular path, e.g. over score series. Requires at
//! least three points and a nonzero spread, otherwise returns no indices.

/// Default z-score threshold
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Indices whose absolute z-score exceeds `threshold`
///
/// Uses the population standard deviation. A series with fewer than three
/// points or zero spread yields no anomalies.
#[must_use]
pub fn detect_anomalies(data: &[f64], threshold: f64) -> Vec<usize> {
    if data.len() < 3 {
        return Vec::new();
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if std == 0.0 {
        return Vec::new();
    }

    data.iter()
        .enumerate()
        .filter(|(_, v)| ((*v - mean) / std).abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_single_extreme_value() {
        // Twenty identical points plus one far outlier
        let mut data = vec![10.0; 20];
        data.push(100.0);

        let anomalies = detect_anomalies(&data, DEFAULT_THRESHOLD);
        assert_eq!(anomalies, vec![20]);
    }

    #[test]
    fn all_equal_series_flags_nothing() {
        let data = vec![5.0; 10];
        assert!(detect_anomalies(&data, DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn short_series_flags_nothing() {
        assert!(detect_anomalies(&[1.0, 100.0], DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn threshold_controls_sensitivity() {
        let data = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0];
        let strict = detect_anomalies(&data, 3.0);
        let loose = detect_anomalies(&data, 1.5);

        assert!(strict.len() <= loose.len());
        assert!(loose.contains(&8));
    }
}
