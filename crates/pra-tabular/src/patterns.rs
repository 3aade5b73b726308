//! Pattern and anomaly detection over numeric columns
//!
//! Correlation pairs above a significance threshold, per-column linear
//! trends, and z-score outliers. Insufficient data is never an error:
//! columns that cannot be tested simply contribute no findings.

use crate::stats::{correlation, index_slope, mean, sample_std_dev};
use crate::table::{Column, Table};
use serde::Serialize;

/// Absolute Pearson coefficient above which a pair is reported
pub const CORRELATION_THRESHOLD: f64 = 0.7;

/// Numeric columns examined for trends
const TREND_COLUMN_LIMIT: usize = 3;

/// Values a column needs before a trend is fitted
const TREND_MIN_VALUES: usize = 10;

/// Numeric columns examined for anomalies
const ANOMALY_COLUMN_LIMIT: usize = 5;

/// Z-score above which a value is an outlier
const ANOMALY_Z_THRESHOLD: f64 = 3.0;

/// Example outlier values reported per column
const ANOMALY_EXAMPLE_LIMIT: usize = 3;

/// A strongly correlated column pair
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationPair {
    /// First column
    pub col_a: String,
    /// Second column
    pub col_b: String,
    /// Pearson coefficient
    pub coefficient: f64,
}

/// Direction of a fitted per-column trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Positive slope
    Increasing,
    /// Negative slope
    Decreasing,
}

impl TrendDirection {
    /// String form used in reports
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-column linear trend finding
#[derive(Debug, Clone, Serialize)]
pub struct TrendFinding {
    /// Column name
    pub column: String,
    /// Trend direction
    pub direction: TrendDirection,
    /// Fitted slope against row index
    pub slope: f64,
}

/// A per-column outlier finding
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyFinding {
    /// Column name
    pub column: String,
    /// Outlier count
    pub count: usize,
    /// Up to three example outlier values
    pub examples: Vec<f64>,
}

/// Combined pattern/anomaly findings for a table
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternReport {
    /// Correlation pairs above the threshold
    pub correlations: Vec<CorrelationPair>,
    /// Per-column trend findings
    pub trends: Vec<TrendFinding>,
    /// Per-column outlier findings
    pub anomalies: Vec<AnomalyFinding>,
}

impl PatternReport {
    /// Run both detectors over a table
    #[must_use]
    pub fn analyze(table: &Table) -> Self {
        let mut report = detect_patterns(table);
        report.anomalies = find_anomalies(table);
        report
    }
}

/// Detect correlations and trends over numeric columns
///
/// Every numeric column pair is tested for |Pearson| above 0.7. The first
/// three numeric columns are tested for a linear trend against row index;
/// a trend is reported when the column has more than ten values and the
/// slope magnitude exceeds one percent of the column's standard deviation.
#[must_use]
pub fn detect_patterns(table: &Table) -> PatternReport {
    let numeric = numeric_series(table);
    let mut report = PatternReport::default();

    for i in 0..numeric.len() {
        for j in (i + 1)..numeric.len() {
            let (name_a, col_a) = &numeric[i];
            let (name_b, col_b) = &numeric[j];
            let Some((x, y)) = paired_values(col_a, col_b) else {
                continue;
            };
            if let Some(coefficient) = correlation(&x, &y) {
                if coefficient.abs() > CORRELATION_THRESHOLD {
                    report.correlations.push(CorrelationPair {
                        col_a: (*name_a).to_string(),
                        col_b: (*name_b).to_string(),
                        coefficient,
                    });
                }
            }
        }
    }

    for (name, column) in numeric.iter().take(TREND_COLUMN_LIMIT) {
        let values = column.numeric_values();
        if values.len() <= TREND_MIN_VALUES {
            continue;
        }
        let (Some(slope), Some(std)) = (index_slope(&values), sample_std_dev(&values)) else {
            continue;
        };
        if slope.abs() > std * 0.01 {
            report.trends.push(TrendFinding {
                column: (*name).to_string(),
                direction: if slope > 0.0 {
                    TrendDirection::Increasing
                } else {
                    TrendDirection::Decreasing
                },
                slope,
            });
        }
    }

    tracing::debug!(
        correlations = report.correlations.len(),
        trends = report.trends.len(),
        "pattern detection complete"
    );
    report
}

/// Detect z-score outliers in the first five numeric columns
///
/// A column needs at least four non-missing values and nonzero spread;
/// values with |z| above 3 (sample standard deviation) are outliers.
#[must_use]
pub fn find_anomalies(table: &Table) -> Vec<AnomalyFinding> {
    let mut findings = Vec::new();

    for (name, column) in numeric_series(table).iter().take(ANOMALY_COLUMN_LIMIT) {
        let values = column.numeric_values();
        if values.len() < 4 {
            continue;
        }
        let (Some(mean_val), Some(std)) = (mean(&values), sample_std_dev(&values)) else {
            continue;
        };
        if std == 0.0 {
            continue;
        }

        let outliers: Vec<f64> = values
            .iter()
            .filter(|v| ((**v - mean_val) / std).abs() > ANOMALY_Z_THRESHOLD)
            .copied()
            .collect();

        if !outliers.is_empty() {
            findings.push(AnomalyFinding {
                column: (*name).to_string(),
                count: outliers.len(),
                examples: outliers.into_iter().take(ANOMALY_EXAMPLE_LIMIT).collect(),
            });
        }
    }

    findings
}

/// Full pairwise correlation matrix over numeric columns
///
/// Returns the column labels and a row-major symmetric matrix with unit
/// diagonal; cells that cannot be computed are zero.
#[must_use]
pub fn correlation_matrix(table: &Table) -> (Vec<String>, Vec<Vec<f64>>) {
    let numeric = numeric_series(table);
    let labels: Vec<String> = numeric.iter().map(|(name, _)| (*name).to_string()).collect();

    let mut matrix = vec![vec![0.0; numeric.len()]; numeric.len()];
    for i in 0..numeric.len() {
        matrix[i][i] = 1.0;
        for j in (i + 1)..numeric.len() {
            let value = paired_values(numeric[i].1, numeric[j].1)
                .and_then(|(x, y)| correlation(&x, &y))
                .unwrap_or(0.0);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }

    (labels, matrix)
}

fn numeric_series<'a>(table: &'a Table) -> Vec<(&'a str, &'a Column)> {
    table
        .columns()
        .filter(|(_, c)| matches!(c, Column::Numeric(_)))
        .collect()
}

/// Rows where both columns have a value
fn paired_values(a: &Column, b: &Column) -> Option<(Vec<f64>, Vec<f64>)> {
    let (Column::Numeric(a), Column::Numeric(b)) = (a, b) else {
        return None;
    };
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (va, vb) in a.iter().zip(b.iter()) {
        if let (Some(va), Some(vb)) = (va, vb) {
            x.push(*va);
            y.push(*vb);
        }
    }
    (x.len() >= 2).then_some((x, y))
}
