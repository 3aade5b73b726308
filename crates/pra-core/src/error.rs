//! Error types for PRA orchestration
//!
//! The taxonomy distinguishes input rejection (checked before any task
//! record exists) from pipeline failure (committed to the task record and
//! re-raised). Degraded strategies — generation, forecasting, sparse data —
//! never surface here; they are recovered locally by their wrappers.

use crate::task::{TaskId, TaskStatus};
use pra_tabular::TabularError;

/// Main PRA error type
#[derive(Debug, thiserror::Error)]
pub enum PraError {
    /// Unrecognized file extension, rejected before the pipeline starts
    #[error("unsupported file type: {filename} (allowed: {allowed})")]
    UnsupportedInput {
        /// Offending file name
        filename: String,
        /// Accepted extensions, comma separated
        allowed: String,
    },

    /// News source failed
    #[error("news search failed: {0}")]
    News(#[from] NewsError),

    /// Document extraction failed
    #[error("document extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Tabular data could not be loaded
    #[error("data loading failed: {0}")]
    DataLoad(#[from] TabularError),

    /// Report rendering failed after degradation
    #[error("report rendering failed: {0}")]
    Report(#[from] ReportError),

    /// Task store operation failed
    #[error("task store failed: {0}")]
    Store(#[from] StoreError),

    /// An engine could not be constructed
    #[error("engine initialization failed: {0}")]
    EngineInit(String),

    /// Task does not exist
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Illegal task lifecycle transition
    #[error("illegal task transition: {from} -> {to}")]
    IllegalTransition {
        /// Current status
        from: TaskStatus,
        /// Requested status
        to: TaskStatus,
    },
}

impl PraError {
    /// Whether the error is an input rejection rather than a task failure
    #[inline]
    #[must_use]
    pub fn is_input_rejection(&self) -> bool {
        matches!(self, Self::UnsupportedInput { .. })
    }
}

/// News source errors
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    /// Transport-level failure
    #[error("http error: {0}")]
    Http(String),

    /// Response could not be decoded
    #[error("response error: {0}")]
    Response(String),
}

/// Document extraction errors
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Format not handled by this extractor
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Document bytes could not be decoded
    #[error("decode failed: {0}")]
    DecodeFailed(String),
}

/// Chart rendering errors
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Artifact could not be written
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Chart payload could not be encoded
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Report rendering errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Neither the rich artifact nor the markdown degrade could be written
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Task store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Task id already present on create
    #[error("task already exists: {0}")]
    AlreadyExists(TaskId),

    /// Task id missing on update
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_input_is_a_rejection() {
        let err = PraError::UnsupportedInput {
            filename: "data.parquet".to_string(),
            allowed: ".csv, .xlsx, .xls".to_string(),
        };
        assert!(err.is_input_rejection());
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn pipeline_errors_are_not_rejections() {
        let err = PraError::News(NewsError::Http("timeout".to_string()));
        assert!(!err.is_input_rejection());
    }
}
