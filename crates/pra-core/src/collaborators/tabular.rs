//! Tabular loading collaborator
//!
//! Datasets are consumed through [`TabularLoader`]. The default
//! implementation decodes CSV; spreadsheet formats belong to a production
//! loader behind the same trait.

use crate::collaborators::documents::file_extension;
use async_trait::async_trait;
use pra_tabular::{Table, TabularError};

/// Dataset loading interface
#[async_trait]
pub trait TabularLoader: Send + Sync {
    /// Decode uploaded bytes into a table
    async fn load(&self, bytes: &[u8], filename: &str) -> Result<Table, TabularError>;
}

/// CSV-decoding loader
#[derive(Debug, Clone, Default)]
pub struct CsvLoader;

impl CsvLoader {
    /// Create the loader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TabularLoader for CsvLoader {
    async fn load(&self, bytes: &[u8], filename: &str) -> Result<Table, TabularError> {
        match file_extension(filename).as_str() {
            "csv" => {
                let table = Table::from_csv(bytes)?;
                tracing::info!(
                    rows = table.row_count(),
                    columns = table.column_count(),
                    filename,
                    "loaded tabular data"
                );
                Ok(table)
            }
            other => Err(TabularError::ParseFailed(format!(
                "{other} requires the spreadsheet loading service"
            ))),
        }
    }
}
