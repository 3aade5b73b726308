//! Tabular data analysis
//!
//! An in-memory column-typed table with:
//! - CSV decoding with numeric/text inference
//! - Descriptive statistics (shape, dtypes, missing counts, numeric
//!   describe-stats, categorical mode/frequency)
//! - Pattern detection: pairwise Pearson correlation and per-column
//!   linear trends
//! - Anomaly detection: per-column z-score outliers

#![warn(unreachable_pub)]

pub mod describe;
pub mod error;
pub mod patterns;
pub mod stats;
pub mod table;

pub use describe::TableStats;
pub use error::TabularError;
pub use patterns::{
    correlation_matrix, detect_patterns, find_anomalies, AnomalyFinding, CorrelationPair,
    PatternReport, TrendDirection, TrendFinding,
};
pub use table::{Column, Table};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
