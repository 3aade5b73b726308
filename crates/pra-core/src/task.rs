//! Task data model and lifecycle state machine
//!
//! A task is one unit of requested analysis work with a persisted
//! lifecycle. The status machine is strict: `Pending` moves to
//! `Processing` exactly once, `Processing` moves to exactly one of the two
//! terminal states, and nothing leaves a terminal state.

use crate::error::PraError;
use chrono::{DateTime, Utc};
use pra_sentiment::AggregateSentiment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ulid::Ulid;

/// Unique task identifier (ULID for time-ordered sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Ulid);

impl TaskId {
    /// Generate new task ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Created, pipeline not yet started
    Pending,
    /// Pipeline executing
    Processing,
    /// Terminal: every stage succeeded
    Completed,
    /// Terminal: a stage failed
    Failed,
}

impl TaskStatus {
    /// Whether no further transition is allowed
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// States reachable from `from`
#[must_use]
pub fn allowed_transitions(from: TaskStatus) -> Vec<TaskStatus> {
    use TaskStatus::*;
    match from {
        Pending => vec![Processing],
        Processing => vec![Completed, Failed],
        Completed => vec![],
        Failed => vec![],
    }
}

/// Validate a status transition
///
/// # Errors
/// `IllegalTransition` when `to` is not reachable from `from`.
pub fn validate_transition(from: TaskStatus, to: TaskStatus) -> Result<(), PraError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(PraError::IllegalTransition { from, to })
    }
}

/// Type of analysis a task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// News search, sentiment and trend forecasting
    NewsInsight,
    /// Uploaded document analysis
    DocumentAnalysis,
    /// Uploaded tabular data analysis
    DataAnalysis,
    /// Anything that fits none of the above
    GeneralResearch,
}

impl TaskType {
    /// String form used in stored records
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::NewsInsight => "news_insight",
            TaskType::DocumentAnalysis => "document_analysis",
            TaskType::DataAnalysis => "data_analysis",
            TaskType::GeneralResearch => "general_research",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted task record
///
/// Invariants: `completed_at` is set if and only if the status is
/// terminal; `error` is non-empty if and only if the status is `Failed`.
/// The orchestrator owns the record for the duration of one execution and
/// persists it at creation and at the terminal transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier
    pub task_id: TaskId,
    /// Lifecycle status
    pub status: TaskStatus,
    /// Analysis type
    pub task_type: TaskType,
    /// Free-text query (news/research tasks)
    pub query: Option<String>,
    /// Instruction accompanying an upload (document/data tasks)
    pub instruction: Option<String>,
    /// Narrative analysis text
    pub summary: Option<String>,
    /// Aggregate sentiment (news tasks only)
    pub sentiment_summary: Option<AggregateSentiment>,
    /// Forecast description (news tasks with enough history)
    pub forecast: Option<String>,
    /// Rendered report reference
    pub report_url: Option<String>,
    /// Chart references in render order
    pub charts: Vec<String>,
    /// Free-form metadata
    pub metadata: Map<String, Value>,
    /// Failure message, set on the failed terminal transition only
    pub error: Option<String>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Terminal transition time
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Create a pending record
    #[must_use]
    pub fn new(task_id: TaskId, task_type: TaskType) -> Self {
        Self {
            task_id,
            status: TaskStatus::Pending,
            task_type,
            query: None,
            instruction: None,
            summary: None,
            sentiment_summary: None,
            forecast: None,
            report_url: None,
            charts: Vec::new(),
            metadata: Map::new(),
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// With the originating query
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// With the upload instruction
    #[inline]
    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Move `Pending` to `Processing`
    ///
    /// # Errors
    /// `IllegalTransition` unless the record is pending.
    pub fn begin_processing(&mut self) -> Result<(), PraError> {
        validate_transition(self.status, TaskStatus::Processing)?;
        self.status = TaskStatus::Processing;
        Ok(())
    }

    /// Commit the successful terminal state
    ///
    /// # Errors
    /// `IllegalTransition` unless the record is processing.
    pub fn complete(&mut self) -> Result<(), PraError> {
        validate_transition(self.status, TaskStatus::Completed)?;
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Commit the failed terminal state with the error text verbatim
    ///
    /// # Errors
    /// `IllegalTransition` unless the record is processing.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), PraError> {
        validate_transition(self.status, TaskStatus::Failed)?;
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}
