//! Narrative analysis stage
//!
//! Every narrative call has a deterministic fallback, so the stage never
//! fails outward: an absent or erroring generation capability degrades to
//! template text and the pipeline keeps its shape.

use crate::genai::client::{CompletionRequest, GenAiError, GenerativeClient};
use crate::genai::prompts;
use crate::plan::AnalysisFocus;
use std::sync::Arc;

/// Entity keywords marking city/location coverage
const CITY_TOPICS: &[&str] = &[
    "delhi", "mumbai", "bangalore", "chennai", "kolkata", "hyderabad", "pune",
];

/// Entity keywords marking technology coverage
const TECH_TOPICS: &[&str] = &["ai", "artificial intelligence", "tech", "technology", "startup"];

/// Entity keywords marking finance coverage
const FINANCE_TOPICS: &[&str] = &["stock", "market", "finance", "investment"];

/// Narrative generation over an optional capability
pub struct NarrativeEngine {
    client: Option<Arc<dyn GenerativeClient>>,
}

impl NarrativeEngine {
    /// Engine backed by a generation capability
    #[inline]
    #[must_use]
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Engine without any capability; every call uses its fallback
    #[inline]
    #[must_use]
    pub fn without_capability() -> Self {
        Self { client: None }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GenAiError> {
        match &self.client {
            Some(client) => client.complete(request).await,
            None => Err(GenAiError::NotConfigured),
        }
    }

    /// Entity/intent-aware analysis of formatted articles
    pub async fn analyze_news(
        &self,
        entity: &str,
        articles: &str,
        intent: &str,
        focus: AnalysisFocus,
    ) -> String {
        let intent = if intent.is_empty() {
            format!("Analyze news about {entity}")
        } else {
            intent.to_string()
        };

        let mut user = prompts::fill(prompts::NEWS_ANALYSIS_PROMPT, "entity", entity);
        user = prompts::fill(&user, "intent", &intent);
        user = prompts::fill(&user, "focus", focus.as_str());
        user = prompts::fill(&user, "articles", truncate(articles, 3000));
        user = prompts::fill(&user, "focus_instructions", focus_instructions(focus));

        match self
            .complete(CompletionRequest {
                system: prompts::NEWS_SYSTEM.to_string(),
                user,
                temperature: 0.7,
                max_tokens: 1200,
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "news narrative degraded to template");
                fallback_news_analysis(entity, articles)
            }
        }
    }

    /// Instruction-guided analysis of a document extract
    pub async fn analyze_document(
        &self,
        filename: &str,
        content: &str,
        instruction: &str,
    ) -> String {
        let mut user = prompts::fill(prompts::DOCUMENT_ANALYSIS_PROMPT, "filename", filename);
        user = prompts::fill(&user, "content", truncate(content, 4000));
        user = prompts::fill(&user, "instruction", instruction);

        match self
            .complete(CompletionRequest {
                system: prompts::DOCUMENT_SYSTEM.to_string(),
                user,
                temperature: 0.6,
                max_tokens: 1500,
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "document narrative degraded to extract");
                format!("Document analysis: {}...", truncate(content, 500))
            }
        }
    }

    /// Instruction-guided analysis of dataset statistics and a row sample
    pub async fn analyze_data(
        &self,
        filename: &str,
        stats: &str,
        sample: &str,
        instruction: &str,
    ) -> String {
        let mut user = prompts::fill(prompts::DATA_ANALYSIS_PROMPT, "filename", filename);
        user = prompts::fill(&user, "stats", stats);
        user = prompts::fill(&user, "sample", sample);
        user = prompts::fill(&user, "instruction", instruction);

        match self
            .complete(CompletionRequest {
                system: prompts::DATA_SYSTEM.to_string(),
                user,
                temperature: 0.6,
                max_tokens: 1500,
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "data narrative degraded to statistics");
                format!("Data analysis: {stats}\n{sample}")
            }
        }
    }

    /// Summarize content, degrading to truncation
    pub async fn summarize(&self, content: &str, max_length: usize) -> String {
        let user = prompts::fill(prompts::SUMMARIZE_PROMPT, "content", truncate(content, 4000));

        match self
            .complete(CompletionRequest {
                system: prompts::SUMMARIZE_SYSTEM.to_string(),
                user,
                temperature: 0.5,
                max_tokens: max_length as u32,
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "summarizer degraded to truncation");
                if content.chars().count() > max_length {
                    format!("{}...", truncate(content, max_length))
                } else {
                    content.to_string()
                }
            }
        }
    }

    /// Synthesize the final report from the per-stage outputs
    pub async fn generate_report(
        &self,
        task_description: &str,
        data_summary: &str,
        sentiment_data: &str,
        forecast_data: &str,
        focus: AnalysisFocus,
    ) -> String {
        let mut user = prompts::fill(prompts::REPORT_PROMPT, "task_description", task_description);
        user = prompts::fill(&user, "analysis_type", focus.as_str());
        user = prompts::fill(&user, "data_summary", data_summary);
        user = prompts::fill(
            &user,
            "sentiment_data",
            if sentiment_data.is_empty() { "N/A" } else { sentiment_data },
        );
        user = prompts::fill(
            &user,
            "forecast_data",
            if forecast_data.is_empty() { "N/A" } else { forecast_data },
        );
        user = prompts::fill(&user, "analysis_specific_section", report_section_name(focus));

        match self
            .complete(CompletionRequest {
                system: prompts::REPORT_SYSTEM.to_string(),
                user,
                temperature: 0.7,
                max_tokens: 2500,
            })
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "report synthesis degraded to template");
                fallback_report(task_description, data_summary, sentiment_data, forecast_data)
            }
        }
    }
}

/// Focus-specific guidance inserted into the news prompt
fn focus_instructions(focus: AnalysisFocus) -> &'static str {
    match focus {
        AnalysisFocus::Highlights => {
            "Focus on:\n- Top 3-5 most important news items\n- Breaking developments or major announcements\n- Brief, impactful summaries of each highlight\n- Why each item matters"
        }
        AnalysisFocus::Sentiment => {
            "Focus on:\n- Overall market/public sentiment (positive/negative/neutral)\n- Sentiment drivers and catalysts\n- Changes in sentiment over time\n- What's driving positive or negative perception"
        }
        AnalysisFocus::Trends => {
            "Focus on:\n- Emerging patterns and trends\n- Directional momentum\n- Comparison to historical patterns\n- Future trajectory predictions"
        }
        AnalysisFocus::Comprehensive | AnalysisFocus::Summary => {
            "Provide:\n- Executive summary of key developments\n- Sentiment overview\n- Emerging trends and patterns\n- Notable events and their implications\n- Forward-looking insights"
        }
    }
}

/// Focus-specific report section title
fn report_section_name(focus: AnalysisFocus) -> &'static str {
    match focus {
        AnalysisFocus::Highlights => "Key Highlights",
        AnalysisFocus::Sentiment => "Sentiment Deep Dive",
        AnalysisFocus::Trends => "Trend Analysis",
        AnalysisFocus::Comprehensive => "Sentiment & Predictions",
        AnalysisFocus::Summary => "Additional Insights",
    }
}

/// Template report used when synthesis is unavailable
fn fallback_report(task: &str, summary: &str, sentiment: &str, forecast: &str) -> String {
    format!(
        "# Research Report\n\n\
         ## Task\n{task}\n\n\
         ## Summary\n{summary}\n\n\
         ## Sentiment Analysis\n{}\n\n\
         ## Predictions\n{}\n\n\
         ## Conclusion\nAnalysis completed successfully. See above for detailed findings.\n",
        if sentiment.is_empty() { "Not available" } else { sentiment },
        if forecast.is_empty() { "Not available" } else { forecast },
    )
}

/// Topic-aware news analysis used when generation is unavailable
fn fallback_news_analysis(entity: &str, articles: &str) -> String {
    let entity_lower = entity.to_lowercase();
    let titles = article_titles(articles);

    let mut numbered = String::new();
    for (i, title) in titles.iter().take(5).enumerate() {
        numbered.push_str(&format!("{}. **{title}**\n\n", i + 1));
    }

    if CITY_TOPICS.iter().any(|t| entity_lower.contains(t)) {
        format!(
            "**Executive Summary of Key Developments in {entity}**\n\n\
             {entity} is making headlines for strategic moves on infrastructure and quality of life. Based on recent developments:\n\n\
             ### Key Highlights:\n\n{numbered}\
             ### Infrastructure & Development:\n\
             The initiatives showcase {entity}'s commitment to sustainable urban development and improved public services. These investments are expected to enhance quality of life for residents while positioning the city for future growth.\n\n\
             ### Impact Assessment:\n\
             - **Short-term**: New policies and projects will create jobs and improve civic amenities\n\
             - **Long-term**: Enhanced infrastructure will attract investment and talent\n\
             - **Challenges**: Execution timelines and budget management remain critical factors\n"
        )
    } else if TECH_TOPICS.iter().any(|t| entity_lower.contains(t)) {
        format!(
            "**Technology Sector Analysis: {entity}**\n\n\
             The {entity} landscape is experiencing rapid evolution across innovation, investment and regulation.\n\n\
             ### Major Developments:\n\n{numbered}\
             ### Industry Trends:\n\
             - **Innovation**: Breakthrough advancements pushing technological boundaries\n\
             - **Investment**: Strong capital inflows indicating market confidence\n\
             - **Regulation**: Increasing scrutiny requiring balanced policy frameworks\n\n\
             ### Strategic Implications:\n\
             The sector faces both opportunities and challenges. Organizations must balance rapid advancement with responsible development.\n"
        )
    } else if FINANCE_TOPICS.iter().any(|t| entity_lower.contains(t)) {
        format!(
            "**Market Analysis: {entity}**\n\n\
             Recent market activity surrounding {entity} shows dynamic movements across multiple indicators.\n\n\
             ### Key Market Events:\n\n{numbered}\
             ### Market Dynamics:\n\
             - **Performance Metrics**: Strong indicators across key business segments\n\
             - **Analyst Outlook**: Mixed perspectives reflecting both opportunities and risks\n\
             - **Risk Factors**: Macroeconomic conditions warrant monitoring\n\n\
             ### Investment Perspective:\n\
             While fundamentals appear solid, investors should weigh growth potential against associated risks.\n"
        )
    } else {
        format!(
            "**Comprehensive Analysis: {entity}**\n\n\
             Recent developments surrounding {entity} present a landscape of opportunities and challenges.\n\n\
             ### Recent Developments:\n\n{numbered}\
             ### Strategic Assessment:\n\
             - **Strategic Planning**: Adapting to evolving circumstances\n\
             - **Risk Management**: Identifying and mitigating potential challenges\n\
             - **Opportunity Capture**: Leveraging favorable conditions for growth\n\n\
             ### Forward Outlook:\n\
             Proactive management and strategic execution will be critical for positive outcomes.\n"
        )
    }
}

/// Pull `Title:` lines out of the formatted article block
fn article_titles(articles: &str) -> Vec<String> {
    articles
        .lines()
        .filter_map(|line| line.strip_prefix("Title:"))
        .map(|t| t.trim().to_string())
        .collect()
}

/// First `max` characters of `s`, on char boundaries
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
