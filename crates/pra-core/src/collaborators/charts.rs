//! Visualization collaborator
//!
//! Chart rendering is external; the pipeline hands a typed payload to a
//! [`ChartRenderer`] and records the returned reference. The default
//! implementation persists the payload as JSON so a rendering service (or
//! a test) can pick it up; the pipeline's observable behavior is the same
//! either way.

use crate::error::ChartError;
use crate::task::TaskId;
use async_trait::async_trait;
use pra_sentiment::SentimentResult;
use serde::Serialize;
use std::path::PathBuf;

/// Kinds of charts the pipelines request, in their fixed render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Per-article sentiment distribution
    Sentiment,
    /// Historical scores plus forecast
    Trend,
    /// Value distribution of one column
    Distribution,
    /// Pairwise correlation matrix
    CorrelationHeatmap,
    /// One column over a date column
    TimeSeries,
    /// Labeled bar values
    Bar,
}

impl ChartKind {
    /// Slug used in artifact names
    #[inline]
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Sentiment => "sentiment",
            ChartKind::Trend => "trend",
            ChartKind::Distribution => "distribution",
            ChartKind::CorrelationHeatmap => "correlation",
            ChartKind::TimeSeries => "timeseries",
            ChartKind::Bar => "bar",
        }
    }
}

/// Chart payload variants
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    /// Per-item sentiment distributions
    Sentiment {
        /// One result per article, in article order
        results: Vec<SentimentResult>,
    },
    /// History with forecast continuation
    Trend {
        /// Observed scores
        history: Vec<f64>,
        /// Predicted scores
        forecast: Vec<f64>,
    },
    /// Raw values of one column
    Distribution {
        /// Non-missing values
        values: Vec<f64>,
    },
    /// Correlation matrix over numeric columns
    Heatmap {
        /// Column labels
        labels: Vec<String>,
        /// Row-major coefficients
        matrix: Vec<Vec<f64>>,
    },
    /// One series over time
    TimeSeries {
        /// Date labels
        timestamps: Vec<String>,
        /// Series values
        values: Vec<f64>,
    },
    /// Labeled bars
    Bar {
        /// Bar labels
        labels: Vec<String>,
        /// Bar values
        values: Vec<f64>,
    },
}

/// Chart rendering interface
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render a chart, returning its reference
    async fn render(
        &self,
        task_id: TaskId,
        kind: ChartKind,
        data: &ChartData,
        title: &str,
    ) -> Result<String, ChartError>;
}

/// Renderer that persists chart payloads as JSON artifacts
#[derive(Debug, Clone)]
pub struct ChartSpecWriter {
    charts_dir: PathBuf,
}

impl ChartSpecWriter {
    /// Writer targeting `charts_dir`
    #[inline]
    #[must_use]
    pub fn new(charts_dir: impl Into<PathBuf>) -> Self {
        Self {
            charts_dir: charts_dir.into(),
        }
    }
}

#[derive(Serialize)]
struct ChartSpec<'a> {
    kind: ChartKind,
    title: &'a str,
    data: &'a ChartData,
}

#[async_trait]
impl ChartRenderer for ChartSpecWriter {
    async fn render(
        &self,
        task_id: TaskId,
        kind: ChartKind,
        data: &ChartData,
        title: &str,
    ) -> Result<String, ChartError> {
        let spec = ChartSpec { kind, title, data };
        let payload =
            serde_json::to_vec_pretty(&spec).map_err(|e| ChartError::EncodeFailed(e.to_string()))?;

        tokio::fs::create_dir_all(&self.charts_dir)
            .await
            .map_err(|e| ChartError::WriteFailed(e.to_string()))?;

        let filename = format!("{task_id}-{}.json", kind.slug());
        let path = self.charts_dir.join(&filename);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| ChartError::WriteFailed(e.to_string()))?;

        tracing::debug!(path = %path.display(), "chart payload written");
        Ok(format!("/charts/{filename}"))
    }
}
