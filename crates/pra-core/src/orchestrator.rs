//! Orchestration state machine
//!
//! Sequences the analysis stages per task type and owns the task's
//! lifecycle. Each pipeline runs strictly in stage order; the record is
//! persisted at creation (already processing) and exactly once more at
//! the terminal transition. The first failing stage abandons the rest,
//! commits `failed` with the error text verbatim, and re-raises after the
//! write. Unsupported uploads are rejected before any record exists.

use crate::collaborators::{
    extract_sections, format_articles_for_analysis, format_sentiment_summary, ChartData, ChartKind,
    ChartRenderer, ChartSpecWriter, CsvLoader, DocumentExtractor, HtmlReportRenderer,
    MemoryTaskStore, MockNewsSource, NewsSource, Page, PlainTextExtractor, ReportRenderer,
    TabularLoader, TaskFilter, TaskStore,
};
use crate::collaborators::documents::file_extension;
use crate::config::PraConfig;
use crate::error::PraError;
use crate::genai::{GenerativeClient, HttpGenerativeClient, NarrativeEngine};
use crate::interpreter::TaskInterpreter;
use crate::task::{TaskId, TaskRecord, TaskType};
use pra_forecast::TrendForecastEngine;
use pra_sentiment::{AggregateSentiment, SentimentEngine, SentimentResult};
use pra_tabular::{correlation_matrix, detect_patterns, find_anomalies, Column, TableStats};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Extensions accepted by the document pipeline
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Extensions accepted by the data pipeline
pub const DATA_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

/// Articles needed before a trend forecast is attempted
const FORECAST_MIN_ARTICLES: usize = 3;

/// Correlation pairs shown in reports and the bar chart
const TOP_CORRELATIONS: usize = 5;

/// What a pipeline produced, applied to the record on commit
#[derive(Debug, Default)]
struct PipelineOutput {
    summary: Option<String>,
    sentiment: Option<AggregateSentiment>,
    forecast: Option<String>,
    report_url: Option<String>,
    charts: Vec<String>,
    metadata: Map<String, Value>,
}

/// The orchestrator
///
/// Owns the engines and reaches every external collaborator through its
/// trait, so tests wire fixtures without touching the pipelines.
pub struct Orchestrator {
    config: PraConfig,
    interpreter: TaskInterpreter,
    narrative: NarrativeEngine,
    sentiment: SentimentEngine,
    forecast: TrendForecastEngine,
    news: Arc<dyn NewsSource>,
    extractor: Arc<dyn DocumentExtractor>,
    loader: Arc<dyn TabularLoader>,
    charts: Arc<dyn ChartRenderer>,
    reports: Arc<dyn ReportRenderer>,
    store: Arc<dyn TaskStore>,
}

impl Orchestrator {
    /// Start building an orchestrator
    #[inline]
    #[must_use]
    pub fn builder(config: PraConfig) -> OrchestratorBuilder {
        OrchestratorBuilder::new(config)
    }

    /// Execute a news/text analysis task
    ///
    /// # Errors
    /// Any pipeline failure, after it has been committed to the record.
    pub async fn execute_text_analysis(
        &self,
        task_id: TaskId,
        query: &str,
        entity: Option<&str>,
        time_range: Option<&str>,
    ) -> Result<TaskRecord, PraError> {
        let mut record = TaskRecord::new(task_id, TaskType::NewsInsight).with_query(query);
        record.begin_processing()?;
        self.store.create(record.clone()).await?;

        tracing::info!(%task_id, "starting text analysis");
        let outcome = self.run_news_pipeline(task_id, query, entity, time_range).await;
        self.commit(record, outcome).await
    }

    /// Execute a document analysis task
    ///
    /// # Errors
    /// `UnsupportedInput` before any record exists; otherwise any pipeline
    /// failure after it has been committed.
    pub async fn execute_document_analysis(
        &self,
        task_id: TaskId,
        bytes: &[u8],
        filename: &str,
        instruction: &str,
    ) -> Result<TaskRecord, PraError> {
        validate_extension(filename, DOCUMENT_EXTENSIONS)?;

        let mut record =
            TaskRecord::new(task_id, TaskType::DocumentAnalysis).with_instruction(instruction);
        record.begin_processing()?;
        self.store.create(record.clone()).await?;

        tracing::info!(%task_id, filename, "starting document analysis");
        let outcome = self
            .run_document_pipeline(task_id, bytes, filename, instruction)
            .await;
        self.commit(record, outcome).await
    }

    /// Execute a data analysis task
    ///
    /// # Errors
    /// `UnsupportedInput` before any record exists; otherwise any pipeline
    /// failure after it has been committed.
    pub async fn execute_data_analysis(
        &self,
        task_id: TaskId,
        bytes: &[u8],
        filename: &str,
        instruction: &str,
    ) -> Result<TaskRecord, PraError> {
        validate_extension(filename, DATA_EXTENSIONS)?;

        let mut record =
            TaskRecord::new(task_id, TaskType::DataAnalysis).with_instruction(instruction);
        record.begin_processing()?;
        self.store.create(record.clone()).await?;

        tracing::info!(%task_id, filename, "starting data analysis");
        let outcome = self
            .run_data_pipeline(task_id, bytes, filename, instruction)
            .await;
        self.commit(record, outcome).await
    }

    /// Fetch one task record
    ///
    /// # Errors
    /// `TaskNotFound` when the id is unknown.
    pub async fn get_task(&self, task_id: TaskId) -> Result<TaskRecord, PraError> {
        self.store
            .get(task_id)
            .await?
            .ok_or(PraError::TaskNotFound(task_id))
    }

    /// List task records newest-first
    ///
    /// # Errors
    /// Store failures only.
    pub async fn list_tasks(
        &self,
        filter: TaskFilter,
        page: Page,
    ) -> Result<(Vec<TaskRecord>, usize), PraError> {
        Ok(self.store.list(filter, page).await?)
    }

    /// Apply the terminal transition and persist it exactly once
    async fn commit(
        &self,
        mut record: TaskRecord,
        outcome: Result<PipelineOutput, PraError>,
    ) -> Result<TaskRecord, PraError> {
        match outcome {
            Ok(output) => {
                record.summary = output.summary;
                record.sentiment_summary = output.sentiment;
                record.forecast = output.forecast;
                record.report_url = output.report_url;
                record.charts = output.charts;
                record.metadata = output.metadata;
                record.complete()?;
                self.store.update(record.clone()).await?;
                tracing::info!(task_id = %record.task_id, "task completed");
                Ok(record)
            }
            Err(e) => {
                tracing::error!(task_id = %record.task_id, error = %e, "task failed");
                record.fail(e.to_string())?;
                self.store.update(record.clone()).await?;
                Err(e)
            }
        }
    }

    async fn run_news_pipeline(
        &self,
        task_id: TaskId,
        query: &str,
        entity: Option<&str>,
        time_range: Option<&str>,
    ) -> Result<PipelineOutput, PraError> {
        // 1. Interpret the request
        let plan = self.interpreter.interpret(query).await;
        let entity = match entity {
            Some(e) => e.to_string(),
            None if !plan.entity.is_empty() => plan.entity.clone(),
            None => query.chars().take(50).collect(),
        };
        let time_range = if !plan.time_range.is_empty() {
            plan.time_range.clone()
        } else {
            time_range
                .unwrap_or(&self.config.default_time_range)
                .to_string()
        };
        tracing::info!(
            focus = %plan.analysis_focus,
            entity = %entity,
            time_range = %time_range,
            "request interpreted"
        );

        // 2. Fetch articles
        let mut articles = self.news.search(&entity, &time_range).await?;
        articles.truncate(self.config.max_articles);

        // 3. Score sentiment per article, then aggregate
        let results: Vec<SentimentResult> = articles
            .iter()
            .map(|a| self.sentiment.predict(&a.content))
            .collect();
        let aggregate = AggregateSentiment::from_results(&results);

        // 4. Charts: sentiment first, trend only when a forecast ran
        let mut charts = Vec::new();
        self.try_render_chart(
            task_id,
            ChartKind::Sentiment,
            &ChartData::Sentiment {
                results: results.clone(),
            },
            &format!("Sentiment Analysis: {entity}"),
            &mut charts,
        )
        .await;

        let mut forecast_text = None;
        if results.len() >= FORECAST_MIN_ARTICLES {
            let description = self
                .forecast
                .forecast_sentiment(&results, self.config.forecast_horizon);
            let history: Vec<f64> = results.iter().map(|r| r.positive).collect();
            let (predicted, _) = self
                .forecast
                .predict_trend(&history, self.config.forecast_horizon);

            self.try_render_chart(
                task_id,
                ChartKind::Trend,
                &ChartData::Trend {
                    history,
                    forecast: predicted,
                },
                &format!("Sentiment Trend: {entity}"),
                &mut charts,
            )
            .await;
            forecast_text = Some(description);
        }

        // 5. Narrative and report synthesis
        let articles_text = format_articles_for_analysis(&articles);
        let narrative = self
            .narrative
            .analyze_news(&entity, &articles_text, &plan.user_intent, plan.analysis_focus)
            .await;

        let sentiment_block = format_sentiment_summary(&aggregate);
        let report_md = self
            .narrative
            .generate_report(
                query,
                &narrative,
                &sentiment_block,
                forecast_text.as_deref().unwrap_or(""),
                plan.analysis_focus,
            )
            .await;

        let report_url = self
            .reports
            .render(task_id, &format!("Analysis Report: {entity}"), &report_md, &charts)
            .await?;

        let mut metadata = Map::new();
        metadata.insert("articles_analyzed".to_string(), json!(articles.len()));
        metadata.insert("entity".to_string(), json!(entity));
        metadata.insert("time_range".to_string(), json!(time_range));

        Ok(PipelineOutput {
            summary: Some(narrative),
            sentiment: Some(aggregate),
            forecast: forecast_text,
            report_url: Some(report_url),
            charts,
            metadata,
        })
    }

    async fn run_document_pipeline(
        &self,
        task_id: TaskId,
        bytes: &[u8],
        filename: &str,
        instruction: &str,
    ) -> Result<PipelineOutput, PraError> {
        // 1. Recover text, then heuristic sections
        let text = self.extractor.extract_text(bytes, filename).await?;
        let sections = extract_sections(&text);

        // 2. Narrative analysis and short summary
        let analysis = self
            .narrative
            .analyze_document(filename, truncate_chars(&text, 4000), instruction)
            .await;
        let summary = self.narrative.summarize(truncate_chars(&text, 3000), 300).await;

        // 3. Report; sentiment is not meaningful for documents
        let word_count = text.split_whitespace().count();
        let mut report = format!(
            "# Document Analysis: {filename}\n\n\
             ## Instruction\n{instruction}\n\n\
             ## Summary\n{summary}\n\n\
             ## Detailed Analysis\n{analysis}\n\n\
             ## Document Statistics\n\
             - Total Length: {} characters\n\
             - Estimated Words: {word_count}\n\
             - Estimated Pages: {}\n",
            text.len(),
            text.len() / 3000,
        );
        if !sections.is_empty() {
            report.push_str("\n## Document Structure\n");
            for (name, content) in &sections {
                report.push_str(&format!("\n### {name}\n{}...\n", truncate_chars(content, 200)));
            }
        }

        let report_url = self
            .reports
            .render(task_id, &format!("Document Analysis: {filename}"), &report, &[])
            .await?;

        let mut metadata = Map::new();
        metadata.insert("filename".to_string(), json!(filename));
        metadata.insert("text_length".to_string(), json!(text.len()));
        metadata.insert("word_count".to_string(), json!(word_count));

        Ok(PipelineOutput {
            summary: Some(analysis),
            report_url: Some(report_url),
            metadata,
            ..PipelineOutput::default()
        })
    }

    async fn run_data_pipeline(
        &self,
        task_id: TaskId,
        bytes: &[u8],
        filename: &str,
        instruction: &str,
    ) -> Result<PipelineOutput, PraError> {
        // 1. Load and describe
        let table = self.loader.load(bytes, filename).await?;
        let stats = TableStats::compute(&table);
        let stats_text = stats.format_for_display();

        // 2. Patterns and anomalies
        let patterns = detect_patterns(&table);
        let anomalies = find_anomalies(&table);

        // 3. Narrative over stats plus a row sample
        let sample = table.sample_rows(10);
        let analysis = self
            .narrative
            .analyze_data(filename, &stats_text, &sample, instruction)
            .await;

        // 4. Charts: distribution, correlation, time series, top correlations
        let numeric = table.numeric_column_names();
        let mut charts = Vec::new();

        if let Some(first) = numeric.first() {
            if let Some(column) = table.column(first) {
                self.try_render_chart(
                    task_id,
                    ChartKind::Distribution,
                    &ChartData::Distribution {
                        values: column.numeric_values(),
                    },
                    &format!("Distribution: {first}"),
                    &mut charts,
                )
                .await;
            }
        }

        if numeric.len() >= 2 {
            let (labels, matrix) = correlation_matrix(&table);
            self.try_render_chart(
                task_id,
                ChartKind::CorrelationHeatmap,
                &ChartData::Heatmap { labels, matrix },
                "Correlation Matrix",
                &mut charts,
            )
            .await;
        }

        if let Some(date_column) = table.detect_date_column() {
            if let Some(series) = time_series_data(&table, date_column, numeric.first().copied()) {
                let title = format!("Trend: {} over time", numeric[0]);
                self.try_render_chart(task_id, ChartKind::TimeSeries, &series, &title, &mut charts)
                    .await;
            }
        }

        if !patterns.correlations.is_empty() {
            let top = patterns.correlations.iter().take(TOP_CORRELATIONS);
            let labels: Vec<String> = top
                .clone()
                .map(|c| format!("{}-{}", c.col_a, c.col_b))
                .collect();
            let values: Vec<f64> = top.map(|c| c.coefficient).collect();
            self.try_render_chart(
                task_id,
                ChartKind::Bar,
                &ChartData::Bar { labels, values },
                "Top Correlations",
                &mut charts,
            )
            .await;
        }

        // 5. Report
        let report = compose_data_report(
            filename,
            instruction,
            &stats_text,
            &analysis,
            &patterns,
            &anomalies,
            table.row_count(),
            &charts,
        );
        let report_url = self
            .reports
            .render(task_id, &format!("Data Analysis: {filename}"), &report, &charts)
            .await?;

        let mut metadata = Map::new();
        metadata.insert("filename".to_string(), json!(filename));
        metadata.insert("rows".to_string(), json!(table.row_count()));
        metadata.insert("columns".to_string(), json!(table.column_count()));
        metadata.insert("numeric_columns".to_string(), json!(numeric.len()));
        metadata.insert(
            "correlations_found".to_string(),
            json!(patterns.correlations.len()),
        );
        metadata.insert("charts_generated".to_string(), json!(charts.len()));

        Ok(PipelineOutput {
            summary: Some(analysis),
            report_url: Some(report_url),
            charts,
            metadata,
            ..PipelineOutput::default()
        })
    }

    /// Render a chart, recording the reference; a renderer failure
    /// degrades the task (the chart is skipped) instead of failing it
    async fn try_render_chart(
        &self,
        task_id: TaskId,
        kind: ChartKind,
        data: &ChartData,
        title: &str,
        charts: &mut Vec<String>,
    ) {
        match self.charts.render(task_id, kind, data, title).await {
            Ok(reference) => charts.push(reference),
            Err(e) => {
                tracing::warn!(%task_id, ?kind, error = %e, "chart rendering skipped");
            }
        }
    }
}

/// Reject unrecognized extensions before the pipeline starts
fn validate_extension(filename: &str, allowed: &[&str]) -> Result<(), PraError> {
    let extension = file_extension(filename);
    if allowed.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(PraError::UnsupportedInput {
            filename: filename.to_string(),
            allowed: allowed
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// Pair a date column with the first numeric column, skipping missing rows
fn time_series_data(
    table: &pra_tabular::Table,
    date_column: &str,
    value_column: Option<&str>,
) -> Option<ChartData> {
    let Column::Text(dates) = table.column(date_column)? else {
        return None;
    };
    let Column::Numeric(values) = table.column(value_column?)? else {
        return None;
    };

    let mut timestamps = Vec::new();
    let mut series = Vec::new();
    for (date, value) in dates.iter().zip(values.iter()) {
        if let (Some(date), Some(value)) = (date, value) {
            timestamps.push(date.clone());
            series.push(*value);
        }
    }

    (!series.is_empty()).then_some(ChartData::TimeSeries {
        timestamps,
        values: series,
    })
}

/// Compose the data-analysis report body
#[allow(clippy::too_many_arguments)]
fn compose_data_report(
    filename: &str,
    instruction: &str,
    stats_text: &str,
    analysis: &str,
    patterns: &pra_tabular::PatternReport,
    anomalies: &[pra_tabular::AnomalyFinding],
    total_rows: usize,
    charts: &[String],
) -> String {
    let mut report = format!(
        "# Data Analysis Report: {filename}\n\n\
         ## Analysis Request\n{instruction}\n\n\
         ## Dataset Overview\n{stats_text}\n\n\
         ## Intelligent Analysis & Insights\n{analysis}\n\n\
         ## Patterns & Trends Detected\n"
    );

    if !patterns.correlations.is_empty() {
        report.push_str("\n### Strong Correlations Found:\n");
        for pair in patterns.correlations.iter().take(TOP_CORRELATIONS) {
            let strength = if pair.coefficient.abs() > 0.8 {
                "Very Strong"
            } else if pair.coefficient.abs() > 0.6 {
                "Strong"
            } else {
                "Moderate"
            };
            let direction = if pair.coefficient > 0.0 { "Positive" } else { "Negative" };
            report.push_str(&format!(
                "- **{}** <-> **{}**: {strength} {direction} correlation ({:.3})\n",
                pair.col_a, pair.col_b, pair.coefficient
            ));
        }
    }

    if !patterns.trends.is_empty() {
        report.push_str("\n### Trends Identified:\n");
        for trend in patterns.trends.iter().take(5) {
            report.push_str(&format!("- **{}**: {}\n", trend.column, trend.direction));
        }
    }

    if !anomalies.is_empty() {
        report.push_str("\n### Data Quality & Anomalies:\n");
        for anomaly in anomalies.iter().take(5) {
            // Percentage denominator is the table's total row count
            let percentage = if total_rows > 0 {
                anomaly.count as f64 / total_rows as f64 * 100.0
            } else {
                0.0
            };
            report.push_str(&format!(
                "- **{}**: {} outliers detected ({percentage:.1}% of data)\n",
                anomaly.column, anomaly.count
            ));
        }
    }

    report.push_str(&format!(
        "\n## Visualizations Generated\n{} charts created for comprehensive analysis:\n",
        charts.len()
    ));
    for (i, chart) in charts.iter().enumerate() {
        let name = chart.rsplit('/').next().unwrap_or(chart);
        report.push_str(&format!("{}. {name}\n", i + 1));
    }

    report
}

/// First `max` characters of `s`, on char boundaries
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Builder wiring engines and collaborators, with working defaults
pub struct OrchestratorBuilder {
    config: PraConfig,
    client: Option<Arc<dyn GenerativeClient>>,
    news: Option<Arc<dyn NewsSource>>,
    extractor: Option<Arc<dyn DocumentExtractor>>,
    loader: Option<Arc<dyn TabularLoader>>,
    charts: Option<Arc<dyn ChartRenderer>>,
    reports: Option<Arc<dyn ReportRenderer>>,
    store: Option<Arc<dyn TaskStore>>,
}

impl OrchestratorBuilder {
    /// Builder over a configuration
    #[must_use]
    pub fn new(config: PraConfig) -> Self {
        Self {
            config,
            client: None,
            news: None,
            extractor: None,
            loader: None,
            charts: None,
            reports: None,
            store: None,
        }
    }

    /// With a generation client
    #[must_use]
    pub fn with_generative_client(mut self, client: Arc<dyn GenerativeClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// With a news source
    #[must_use]
    pub fn with_news_source(mut self, news: Arc<dyn NewsSource>) -> Self {
        self.news = Some(news);
        self
    }

    /// With a document extractor
    #[must_use]
    pub fn with_document_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// With a tabular loader
    #[must_use]
    pub fn with_tabular_loader(mut self, loader: Arc<dyn TabularLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// With a chart renderer
    #[must_use]
    pub fn with_chart_renderer(mut self, charts: Arc<dyn ChartRenderer>) -> Self {
        self.charts = Some(charts);
        self
    }

    /// With a report renderer
    #[must_use]
    pub fn with_report_renderer(mut self, reports: Arc<dyn ReportRenderer>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// With a task store
    #[must_use]
    pub fn with_task_store(mut self, store: Arc<dyn TaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Construct the orchestrator
    ///
    /// # Errors
    /// `EngineInit` when the sentiment model can neither be loaded nor
    /// created.
    pub fn build(self) -> Result<Orchestrator, PraError> {
        let config = self.config;

        let client = self.client.or_else(|| {
            if config.generation.is_configured() {
                match HttpGenerativeClient::new(config.generation.clone()) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn GenerativeClient>),
                    Err(e) => {
                        tracing::warn!(error = %e, "generation client unavailable, using fallbacks");
                        None
                    }
                }
            } else {
                None
            }
        });

        let interpreter = match &client {
            Some(client) => TaskInterpreter::new(Arc::clone(client)),
            None => TaskInterpreter::rule_based(),
        };
        let narrative = match &client {
            Some(client) => NarrativeEngine::new(Arc::clone(client)),
            None => NarrativeEngine::without_capability(),
        };

        let sentiment = SentimentEngine::new(config.sentiment_model_path())
            .map_err(|e| PraError::EngineInit(e.to_string()))?;

        let orchestrator = Orchestrator {
            interpreter,
            narrative,
            sentiment,
            forecast: TrendForecastEngine::new(),
            news: self.news.unwrap_or_else(|| Arc::new(MockNewsSource::new(42))),
            extractor: self
                .extractor
                .unwrap_or_else(|| Arc::new(PlainTextExtractor::new())),
            loader: self.loader.unwrap_or_else(|| Arc::new(CsvLoader::new())),
            charts: self
                .charts
                .unwrap_or_else(|| Arc::new(ChartSpecWriter::new(config.charts_dir.clone()))),
            reports: self
                .reports
                .unwrap_or_else(|| Arc::new(HtmlReportRenderer::new(config.reports_dir.clone()))),
            store: self.store.unwrap_or_else(|| Arc::new(MemoryTaskStore::new())),
            config,
        };
        tracing::info!("orchestrator initialized");
        Ok(orchestrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_validation_is_case_insensitive() {
        assert!(validate_extension("report.PDF", DOCUMENT_EXTENSIONS).is_ok());
        assert!(validate_extension("data.csv", DATA_EXTENSIONS).is_ok());

        let err = validate_extension("data.parquet", DATA_EXTENSIONS).unwrap_err();
        assert!(err.is_input_rejection());
        assert!(err.to_string().contains(".csv"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }

    #[test]
    fn data_report_grades_correlations() {
        let patterns = pra_tabular::PatternReport {
            correlations: vec![pra_tabular::CorrelationPair {
                col_a: "sales".to_string(),
                col_b: "visits".to_string(),
                coefficient: 0.95,
            }],
            trends: vec![],
            anomalies: vec![],
        };
        let anomalies = vec![pra_tabular::AnomalyFinding {
            column: "sales".to_string(),
            count: 2,
            examples: vec![900.0],
        }];

        let report = compose_data_report(
            "sales.csv",
            "find patterns",
            "stats here",
            "analysis here",
            &patterns,
            &anomalies,
            100,
            &["/charts/t-bar.json".to_string()],
        );

        assert!(report.contains("Very Strong Positive correlation (0.950)"));
        assert!(report.contains("- **sales**: 2 outliers detected (2.0% of data)"));
        assert!(report.contains("1 charts created"));
        assert!(report.contains("1. t-bar.json"));
    }
}
