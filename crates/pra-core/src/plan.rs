//! Task plans
//!
//! A plan is the structured interpretation of a free-text request,
//! produced by the interpreter and consumed immediately by the
//! orchestrator. Plans are never persisted on their own.

use crate::task::TaskType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the analysis should emphasize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisFocus {
    /// Top items only
    Highlights,
    /// Sentiment drivers
    Sentiment,
    /// Directional momentum
    Trends,
    /// Everything
    #[default]
    Comprehensive,
    /// Short form
    Summary,
}

impl AnalysisFocus {
    /// String form used in prompts and report sections
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisFocus::Highlights => "highlights",
            AnalysisFocus::Sentiment => "sentiment",
            AnalysisFocus::Trends => "trends",
            AnalysisFocus::Comprehensive => "comprehensive",
            AnalysisFocus::Summary => "summary",
        }
    }
}

impl std::fmt::Display for AnalysisFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured interpretation of a request
///
/// `actions` is informational: it records the interpreter's intended step
/// sequence but the orchestrator drives the actual pipeline from
/// `task_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlan {
    /// Pipeline the request maps to
    pub task_type: TaskType,
    /// Main topic or entity
    #[serde(default)]
    pub entity: String,
    /// Restatement of the user's goal
    #[serde(default)]
    pub user_intent: String,
    /// Emphasis of the analysis
    #[serde(default)]
    pub analysis_focus: AnalysisFocus,
    /// Intended step names
    #[serde(default)]
    pub actions: Vec<String>,
    /// Window the request concerns
    #[serde(default = "default_time_range")]
    pub time_range: String,
    /// Open parameter mapping
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

fn default_time_range() -> String {
    "last_7_days".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_generated_plan_with_defaults() {
        let json = r#"{"task_type": "news_insight", "entity": "Tesla"}"#;
        let plan: TaskPlan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.task_type, TaskType::NewsInsight);
        assert_eq!(plan.entity, "Tesla");
        assert_eq!(plan.analysis_focus, AnalysisFocus::Comprehensive);
        assert_eq!(plan.time_range, "last_7_days");
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn rejects_unknown_task_type() {
        let json = r#"{"task_type": "alchemy"}"#;
        assert!(serde_json::from_str::<TaskPlan>(json).is_err());
    }

    #[test]
    fn focus_serializes_lowercase() {
        let json = serde_json::to_string(&AnalysisFocus::Highlights).unwrap();
        assert_eq!(json, "\"highlights\"");
    }
}
