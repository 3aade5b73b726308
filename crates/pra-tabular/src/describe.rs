//! Descriptive statistics
//!
//! Shape, per-column dtypes and missing counts, describe-stats for numeric
//! columns and mode/frequency for the first five categorical columns, plus
//! a display formatter feeding the narrative stage.

use crate::stats::{mean, percentile, sample_std_dev};
use crate::table::{Column, Table};
use indexmap::IndexMap;
use serde::Serialize;

/// Categorical columns summarized at most
const CATEGORICAL_LIMIT: usize = 5;

/// Describe-stats for one numeric column
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    /// Non-missing values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Minimum
    pub min: f64,
    /// Lower quartile
    pub q25: f64,
    /// Median
    pub median: f64,
    /// Upper quartile
    pub q75: f64,
    /// Maximum
    pub max: f64,
}

/// Mode summary for one categorical column
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalSummary {
    /// Distinct non-missing values
    pub unique: usize,
    /// Most frequent value
    pub top: String,
    /// Occurrences of the most frequent value
    pub freq: usize,
}

/// Full descriptive statistics of a table
#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    /// Row count
    pub rows: usize,
    /// Column count
    pub columns: usize,
    /// Column names in order
    pub column_names: Vec<String>,
    /// Column name to dtype
    pub dtypes: IndexMap<String, String>,
    /// Column name to missing-cell count
    pub missing_values: IndexMap<String, usize>,
    /// Numeric describe-stats per numeric column
    pub numeric_summary: IndexMap<String, NumericSummary>,
    /// Mode/frequency for the first five categorical columns
    pub categorical_summary: IndexMap<String, CategoricalSummary>,
}

impl TableStats {
    /// Compute statistics for a table
    #[must_use]
    pub fn compute(table: &Table) -> Self {
        let mut dtypes = IndexMap::new();
        let mut missing_values = IndexMap::new();
        let mut numeric_summary = IndexMap::new();
        let mut categorical_summary = IndexMap::new();

        for (name, column) in table.columns() {
            dtypes.insert(name.to_string(), column.dtype().to_string());
            missing_values.insert(name.to_string(), column.missing_count());

            match column {
                Column::Numeric(_) => {
                    if let Some(summary) = summarize_numeric(column) {
                        numeric_summary.insert(name.to_string(), summary);
                    }
                }
                Column::Text(values) => {
                    if categorical_summary.len() < CATEGORICAL_LIMIT {
                        if let Some(summary) = summarize_categorical(values) {
                            categorical_summary.insert(name.to_string(), summary);
                        }
                    }
                }
            }
        }

        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            column_names: table.column_names().iter().map(|s| s.to_string()).collect(),
            dtypes,
            missing_values,
            numeric_summary,
            categorical_summary,
        }
    }

    /// Render for the narrative prompt and report body
    #[must_use]
    pub fn format_for_display(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Dataset Shape: {} rows x {} columns",
            self.rows, self.columns
        ));
        lines.push(format!("\nColumns: {}", self.column_names.join(", ")));

        if !self.numeric_summary.is_empty() {
            lines.push("\n### Numeric Summary:".to_string());
            for (name, summary) in self.numeric_summary.iter().take(3) {
                lines.push(format!("\n{name}:"));
                lines.push(format!("  Mean: {:.2}", summary.mean));
                lines.push(format!("  Std: {:.2}", summary.std));
                lines.push(format!("  Min: {:.2}", summary.min));
                lines.push(format!("  Max: {:.2}", summary.max));
            }
        }

        lines.join("\n")
    }
}

fn summarize_numeric(column: &Column) -> Option<NumericSummary> {
    let values = column.numeric_values();
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(NumericSummary {
        count: values.len(),
        mean: mean(&values)?,
        std: sample_std_dev(&values).unwrap_or(0.0),
        min: sorted[0],
        q25: percentile(&sorted, 0.25)?,
        median: percentile(&sorted, 0.5)?,
        q75: percentile(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

fn summarize_categorical(values: &[Option<String>]) -> Option<CategoricalSummary> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    if counts.is_empty() {
        return None;
    }

    let (top, freq) = counts
        .iter()
        .max_by_key(|(_, count)| *count)
        .map(|(value, count)| ((*value).to_string(), *count))?;

    Some(CategoricalSummary {
        unique: counts.len(),
        top,
        freq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use pretty_assertions::assert_eq;

    fn fixture() -> Table {
        let csv = "region,sales,returns\n\
            north,10,1\n\
            north,20,2\n\
            south,30,3\n\
            north,40,\n";
        Table::from_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn computes_shape_and_dtypes() {
        let stats = TableStats::compute(&fixture());

        assert_eq!(stats.rows, 4);
        assert_eq!(stats.columns, 3);
        assert_eq!(stats.dtypes["region"], "text");
        assert_eq!(stats.dtypes["sales"], "numeric");
        assert_eq!(stats.missing_values["returns"], 1);
    }

    #[test]
    fn numeric_summary_matches_hand_computation() {
        let stats = TableStats::compute(&fixture());
        let sales = &stats.numeric_summary["sales"];

        assert_eq!(sales.count, 4);
        assert!((sales.mean - 25.0).abs() < 1e-9);
        assert!((sales.min - 10.0).abs() < 1e-9);
        assert!((sales.max - 40.0).abs() < 1e-9);
        assert!((sales.median - 25.0).abs() < 1e-9);
    }

    #[test]
    fn categorical_summary_finds_mode() {
        let stats = TableStats::compute(&fixture());
        let region = &stats.categorical_summary["region"];

        assert_eq!(region.unique, 2);
        assert_eq!(region.top, "north");
        assert_eq!(region.freq, 3);
    }

    #[test]
    fn display_includes_shape_and_columns() {
        let text = TableStats::compute(&fixture()).format_for_display();
        assert!(text.contains("Dataset Shape: 4 rows x 3 columns"));
        assert!(text.contains("Columns: region, sales, returns"));
        assert!(text.contains("### Numeric Summary:"));
        assert!(text.contains("Mean: 25.00"));
    }
}
