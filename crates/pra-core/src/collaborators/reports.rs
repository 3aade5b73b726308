//! Report rendering collaborator
//!
//! Reports are synthesized as markdown and handed to a [`ReportRenderer`].
//! The default implementation renders HTML; if the rich pass fails for any
//! reason it degrades to writing the markdown itself, and only when even
//! that fails does the stage error.

use crate::error::ReportError;
use crate::task::TaskId;
use async_trait::async_trait;
use chrono::Utc;
use pra_sentiment::AggregateSentiment;
use pulldown_cmark::{html, Options, Parser};
use std::path::PathBuf;

/// Report rendering interface
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Render a markdown report, returning its reference
    async fn render(
        &self,
        task_id: TaskId,
        title: &str,
        markdown: &str,
        charts: &[String],
    ) -> Result<String, ReportError>;
}

/// HTML renderer with markdown degrade
#[derive(Debug, Clone)]
pub struct HtmlReportRenderer {
    reports_dir: PathBuf,
}

impl HtmlReportRenderer {
    /// Renderer targeting `reports_dir`
    #[inline]
    #[must_use]
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    async fn write_html(
        &self,
        task_id: TaskId,
        title: &str,
        markdown: &str,
        charts: &[String],
    ) -> Result<String, ReportError> {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut body = String::new();
        html::push_html(&mut body, parser);

        let mut chart_list = String::new();
        if !charts.is_empty() {
            chart_list.push_str("<h2>Visualizations</h2>\n<ul>\n");
            for chart in charts {
                chart_list.push_str(&format!("<li><a href=\"{chart}\">{chart}</a></li>\n"));
            }
            chart_list.push_str("</ul>\n");
        }

        let page = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n<h1>{title}</h1>\n<p><em>Generated: {}</em></p>\n{body}{chart_list}</body>\n</html>\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
        );

        let filename = format!("{task_id}-report.html");
        self.write_artifact(&filename, page.as_bytes()).await?;
        Ok(format!("/reports/{filename}"))
    }

    async fn write_markdown(
        &self,
        task_id: TaskId,
        title: &str,
        markdown: &str,
    ) -> Result<String, ReportError> {
        let content = format!(
            "# {title}\n\n**Generated:** {}\n\n---\n\n{markdown}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
        );

        let filename = format!("{task_id}-report.md");
        self.write_artifact(&filename, content.as_bytes()).await?;
        Ok(format!("/reports/{filename}"))
    }

    async fn write_artifact(&self, filename: &str, bytes: &[u8]) -> Result<(), ReportError> {
        tokio::fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| ReportError::WriteFailed(e.to_string()))?;
        tokio::fs::write(self.reports_dir.join(filename), bytes)
            .await
            .map_err(|e| ReportError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl ReportRenderer for HtmlReportRenderer {
    async fn render(
        &self,
        task_id: TaskId,
        title: &str,
        markdown: &str,
        charts: &[String],
    ) -> Result<String, ReportError> {
        match self.write_html(task_id, title, markdown, charts).await {
            Ok(reference) => {
                tracing::info!(reference = %reference, "report rendered");
                Ok(reference)
            }
            Err(e) => {
                tracing::warn!(error = %e, "html rendering failed, degrading to markdown");
                self.write_markdown(task_id, title, markdown).await
            }
        }
    }
}

/// Render the aggregate sentiment block embedded in reports
#[must_use]
pub fn format_sentiment_summary(sentiment: &AggregateSentiment) -> String {
    format!(
        "## Sentiment Analysis\n\n\
         **Overall Sentiment:** {}\n\n\
         - Positive: {:.1}%\n\
         - Neutral: {:.1}%\n\
         - Negative: {:.1}%\n\
         - Confidence: {:.1}%\n\n",
        sentiment.overall,
        sentiment.positive * 100.0,
        sentiment.neutral * 100.0,
        sentiment.negative * 100.0,
        sentiment.confidence * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pra_sentiment::SentimentResult;
    use tempfile::tempdir;

    #[tokio::test]
    async fn renders_html_report_with_chart_links() {
        let dir = tempdir().unwrap();
        let renderer = HtmlReportRenderer::new(dir.path());
        let task_id = TaskId::new();

        let reference = renderer
            .render(
                task_id,
                "Analysis Report: Tesla",
                "# Executive Summary\n\nAll good.",
                &["/charts/x-sentiment.json".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(reference, format!("/reports/{task_id}-report.html"));

        let page =
            std::fs::read_to_string(dir.path().join(format!("{task_id}-report.html"))).unwrap();
        assert!(page.contains("<h1>Analysis Report: Tesla</h1>"));
        assert!(page.contains("Executive Summary"));
        assert!(page.contains("/charts/x-sentiment.json"));
    }

    #[test]
    fn sentiment_block_shows_percentages() {
        let aggregate = AggregateSentiment::from_results(&[SentimentResult::from_distribution(
            0.6, 0.3, 0.1,
        )]);
        let block = format_sentiment_summary(&aggregate);

        assert!(block.contains("**Overall Sentiment:** positive"));
        assert!(block.contains("- Positive: 60.0%"));
        assert!(block.contains("- Confidence: 60.0%"));
    }
}
