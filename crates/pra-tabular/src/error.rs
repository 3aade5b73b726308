//! Error types for tabular data handling

/// Errors raised when decoding or inspecting tables
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    /// Input bytes could not be decoded as a table
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// Table has no rows or no columns
    #[error("table is empty")]
    Empty,

    /// Referenced column does not exist
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}
