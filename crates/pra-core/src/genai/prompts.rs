//! Prompt catalog for the generation capability
//!
//! Every prompt the pipelines send lives here so tests and reviews can see
//! the full surface in one place. Placeholders are filled with `format!`
//! by the callers.

/// System prompt for task interpretation
pub const INTERPRETER_SYSTEM: &str = "You are a task planning expert.";

/// Extracts a structured plan from a free-text query
pub const INTERPRETER_PROMPT: &str = r#"You are an intelligent task interpreter for a research agent.

Given a user's natural language query, extract and structure the task into a JSON format.

User Query: {query}

Analyze the query carefully to understand:
- What the user wants to know (the intent)
- What topic/entity they're asking about
- What timeframe they're interested in
- What type of analysis they need

Output ONLY a valid JSON object:
{
    "task_type": "news_insight" | "document_analysis" | "data_analysis" | "general_research",
    "entity": "Main entity/company/topic being asked about",
    "user_intent": "What the user wants to learn or achieve",
    "analysis_focus": "highlights" | "sentiment" | "trends" | "comprehensive" | "summary",
    "actions": ["action1", "action2"],
    "time_range": "today" | "last_3_days" | "last_7_days" | "last_30_days",
    "parameters": {}
}

Output ONLY the JSON, no explanation."#;

/// System prompt for news analysis
pub const NEWS_SYSTEM: &str =
    "You are an expert news analyst who provides insightful, context-aware analysis tailored to user needs.";

/// Analyzes a set of formatted articles
pub const NEWS_ANALYSIS_PROMPT: &str = r#"You are an intelligent news analyst. Analyze the following news.

Topic: {entity}
User's Request: {intent}
Analysis Type: {focus}

News Articles:
{articles}

Provide analysis that DIRECTLY addresses what the user asked for:

{focus_instructions}

Be specific and relevant. For city/location news, focus on infrastructure, quality of life and civic matters. For company news, focus on market performance, strategy and competitive position.

Analysis:"#;

/// System prompt for summarization
pub const SUMMARIZE_SYSTEM: &str = "You are a professional summarizer.";

/// Summarizes arbitrary content
pub const SUMMARIZE_PROMPT: &str = r#"Summarize the following content concisely and professionally:

Content:
{content}

Provide a clear, structured summary highlighting:
1. Main points
2. Key insights
3. Important details

Summary:"#;

/// System prompt for document analysis
pub const DOCUMENT_SYSTEM: &str = "You are a document analysis expert.";

/// Analyzes a document extract under an instruction
pub const DOCUMENT_ANALYSIS_PROMPT: &str = r#"Analyze the following document extract:

Document: {filename}
Content:
{content}

Task: {instruction}

Provide detailed insights following the instruction. Be thorough and structure your response clearly.

Analysis:"#;

/// System prompt for data analysis
pub const DATA_SYSTEM: &str = "You are a data scientist.";

/// Analyzes dataset statistics and a row sample under an instruction
pub const DATA_ANALYSIS_PROMPT: &str = r#"Analyze the following dataset:

Dataset: {filename}
Summary Statistics:
{stats}

Sample Data:
{sample}

Task: {instruction}

Provide:
1. Data overview
2. Key patterns identified
3. Anomalies or outliers
4. Correlations
5. Recommendations

Analysis:"#;

/// System prompt for report synthesis
pub const REPORT_SYSTEM: &str =
    "You are a professional research analyst who creates insightful, actionable reports.";

/// Synthesizes the final report from the per-stage outputs
pub const REPORT_PROMPT: &str = r#"You are a professional research analyst. Generate a comprehensive, intelligent report.

User's Request: {task_description}
Analysis Type: {analysis_type}

Data Summary:
{data_summary}

Sentiment Analysis:
{sentiment_data}

Predictions/Trends:
{forecast_data}

Generate a well-structured report that directly addresses what the user asked for, with actionable insights and specific recommendations.

Structure:
# Executive Summary
# Key Findings
# Detailed Analysis
# {analysis_specific_section}
# Recommendations

Use markdown formatting. Be insightful, not generic.

Report:"#;

/// Fill a single `{name}` placeholder
#[must_use]
pub fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_named_placeholder() {
        let out = fill("Topic: {entity}", "entity", "Tesla");
        assert_eq!(out, "Topic: Tesla");
    }

    #[test]
    fn interpreter_prompt_demands_json() {
        assert!(INTERPRETER_PROMPT.contains("Output ONLY the JSON"));
        assert!(INTERPRETER_PROMPT.contains("{query}"));
    }
}
