//! External collaborator interfaces and default implementations
//!
//! Each collaborator is a trait at the seam: the pipelines must not be
//! able to observe which implementation is wired in.

pub mod charts;
pub mod documents;
pub mod news;
pub mod reports;
pub mod store;
pub mod tabular;

pub use charts::{ChartData, ChartKind, ChartRenderer, ChartSpecWriter};
pub use documents::{extract_sections, file_extension, DocumentExtractor, PlainTextExtractor};
pub use news::{
    format_articles_for_analysis, parse_time_range, Article, MockNewsSource, NewsApiSource,
    NewsSource,
};
pub use reports::{format_sentiment_summary, HtmlReportRenderer, ReportRenderer};
pub use store::{MemoryTaskStore, Page, TaskFilter, TaskStore};
pub use tabular::{CsvLoader, TabularLoader};
