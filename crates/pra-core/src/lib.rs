//! PRA Core - orchestration for the Personal Research Agent
//!
//! Turns an unstructured analysis request into a structured research
//! artifact:
//! - Interprets free text into a structured plan (generation-backed, with
//!   a deterministic keyword-rule fallback)
//! - Sequences the sentiment, forecast and pattern engines per task type
//! - Owns the task lifecycle: one record per task, exactly one terminal
//!   state, failures committed before they are re-raised
//! - Reaches every external system (news, extraction, loading, rendering,
//!   persistence) through a collaborator trait
//!
//! # Example
//!
//! ```rust,ignore
//! use pra_core::{Orchestrator, PraConfig, TaskId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::builder(PraConfig::new()).build()?;
//!
//! let task = orchestrator
//!     .execute_text_analysis(TaskId::new(), "today's big news highlights", None, None)
//!     .await?;
//!
//! println!("{}: {:?}", task.task_id, task.status);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod collaborators;
pub mod config;
pub mod error;
pub mod genai;
pub mod interpreter;
pub mod orchestrator;
pub mod plan;
pub mod task;

// Re-exports for convenience
pub use collaborators::{
    Article, ChartData, ChartKind, ChartRenderer, ChartSpecWriter, CsvLoader, DocumentExtractor,
    HtmlReportRenderer, MemoryTaskStore, MockNewsSource, NewsApiSource, NewsSource, Page,
    PlainTextExtractor, ReportRenderer, TabularLoader, TaskFilter, TaskStore,
};
pub use config::{GenerationConfig, PraConfig};
pub use error::{ChartError, ExtractError, NewsError, PraError, ReportError, StoreError};
pub use genai::{CompletionRequest, GenAiError, GenerativeClient, HttpGenerativeClient, NarrativeEngine};
pub use interpreter::{fallback_interpret, TaskInterpreter};
pub use orchestrator::{Orchestrator, OrchestratorBuilder, DATA_EXTENSIONS, DOCUMENT_EXTENSIONS};
pub use plan::{AnalysisFocus, TaskPlan};
pub use task::{
    allowed_transitions, validate_transition, TaskId, TaskRecord, TaskStatus, TaskType,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with PRA Core
    pub use crate::{
        Orchestrator, PraConfig, TaskFilter, TaskId, TaskRecord, TaskStatus, TaskStore, TaskType,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
