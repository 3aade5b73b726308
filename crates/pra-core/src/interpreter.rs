//! Task interpreter
//!
//! Converts a free-text request into a [`TaskPlan`]. The primary strategy
//! asks the generation capability for a JSON plan; any failure — absent
//! capability, transport error, malformed JSON — falls into a
//! deterministic keyword cascade. `interpret` never fails outward.

use crate::genai::{strip_code_fences, CompletionRequest, GenerativeClient};
use crate::genai::prompts;
use crate::plan::{AnalysisFocus, TaskPlan};
use crate::task::TaskType;
use serde_json::Map;
use std::sync::Arc;

/// Keywords selecting the highlights focus
pub const HIGHLIGHT_KEYWORDS: &[&str] = &["highlight", "headlines", "top news", "breaking", "major"];

/// Keywords selecting the sentiment focus
pub const SENTIMENT_KEYWORDS: &[&str] = &["sentiment", "feeling", "opinion", "perception"];

/// Keywords selecting the trends focus
pub const TREND_KEYWORDS: &[&str] = &["trend", "pattern", "direction", "momentum"];

/// Keywords selecting the `today` window
pub const TODAY_KEYWORDS: &[&str] = &["today", "current"];

/// Keywords selecting the three-day window
pub const RECENT_KEYWORDS: &[&str] = &["recent", "latest", "past few days"];

/// Keywords selecting the seven-day window
pub const WEEK_KEYWORDS: &[&str] = &["week", "weekly"];

/// Keywords selecting the thirty-day window
pub const MONTH_KEYWORDS: &[&str] = &["month", "monthly"];

/// Keywords routing to the news pipeline
pub const NEWS_KEYWORDS: &[&str] = &["news", "article", "sentiment", "stock", "market"];

/// Keywords routing to the document pipeline
pub const DOCUMENT_KEYWORDS: &[&str] = &["pdf", "document", "paper", "file"];

/// Keywords routing to the data pipeline
pub const DATA_KEYWORDS: &[&str] = &["csv", "excel", "data", "dataset"];

/// Maximum characters of the query used as the default entity
const ENTITY_CHAR_LIMIT: usize = 100;

/// Task interpreter with rule-based fallback
pub struct TaskInterpreter {
    client: Option<Arc<dyn GenerativeClient>>,
}

impl TaskInterpreter {
    /// Interpreter backed by a generation capability
    #[inline]
    #[must_use]
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Interpreter that always uses the keyword cascade
    #[inline]
    #[must_use]
    pub fn rule_based() -> Self {
        Self { client: None }
    }

    /// Interpret a query into a plan; never fails
    pub async fn interpret(&self, query: &str) -> TaskPlan {
        if let Some(client) = &self.client {
            match self.interpret_generated(client.as_ref(), query).await {
                Ok(plan) => {
                    tracing::info!(task_type = %plan.task_type, "task interpreted");
                    return plan;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "plan generation failed, using keyword rules");
                }
            }
        }
        fallback_interpret(query)
    }

    async fn interpret_generated(
        &self,
        client: &dyn GenerativeClient,
        query: &str,
    ) -> Result<TaskPlan, Box<dyn std::error::Error + Send + Sync>> {
        let user = prompts::fill(prompts::INTERPRETER_PROMPT, "query", query);
        let content = client
            .complete(CompletionRequest {
                system: prompts::INTERPRETER_SYSTEM.to_string(),
                user,
                temperature: 0.3,
                max_tokens: 500,
            })
            .await?;

        let plan: TaskPlan = serde_json::from_str(strip_code_fences(&content))?;
        Ok(plan)
    }
}

/// Deterministic keyword-rule interpretation
///
/// Each classification is an ordered first-match-wins cascade over the
/// keyword sets above; tests assert against the sets directly.
#[must_use]
pub fn fallback_interpret(query: &str) -> TaskPlan {
    let query_lower = query.to_lowercase();
    let matches = |words: &[&str]| words.iter().any(|w| query_lower.contains(w));

    let analysis_focus = if matches(HIGHLIGHT_KEYWORDS) {
        AnalysisFocus::Highlights
    } else if matches(SENTIMENT_KEYWORDS) {
        AnalysisFocus::Sentiment
    } else if matches(TREND_KEYWORDS) {
        AnalysisFocus::Trends
    } else {
        AnalysisFocus::Comprehensive
    };

    let time_range = if matches(TODAY_KEYWORDS) {
        "today"
    } else if matches(RECENT_KEYWORDS) {
        "last_3_days"
    } else if matches(WEEK_KEYWORDS) {
        "last_7_days"
    } else if matches(MONTH_KEYWORDS) {
        "last_30_days"
    } else {
        "last_7_days"
    };

    let (task_type, actions): (TaskType, &[&str]) = if matches(NEWS_KEYWORDS) {
        (
            TaskType::NewsInsight,
            &["search_news", "analyze_sentiment", "predict_trends", "generate_report"],
        )
    } else if matches(DOCUMENT_KEYWORDS) {
        (
            TaskType::DocumentAnalysis,
            &["extract_text", "summarize_text", "generate_report"],
        )
    } else if matches(DATA_KEYWORDS) {
        (
            TaskType::DataAnalysis,
            &["load_data", "analyze_patterns", "visualize_data", "generate_report"],
        )
    } else {
        (
            TaskType::GeneralResearch,
            &["research", "summarize", "generate_report"],
        )
    };

    TaskPlan {
        task_type,
        entity: query.chars().take(ENTITY_CHAR_LIMIT).collect(),
        user_intent: query.to_string(),
        analysis_focus,
        actions: actions.iter().map(|a| (*a).to_string()).collect(),
        time_range: time_range.to_string(),
        parameters: Map::new(),
    }
}
