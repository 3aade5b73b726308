//! Testing utilities for the PRA workspace
//!
//! Shared fixtures: scripted collaborators, canned generation clients,
//! and orchestrator constructors over temp directories.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use pra_core::collaborators::news::Article;
use pra_core::genai::{CompletionRequest, GenAiError, GenerativeClient};
use pra_core::{
    DocumentExtractor, ExtractError, NewsError, NewsSource, Orchestrator, PraConfig, PraError,
};
use std::sync::{Arc, Once};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a test subscriber once; honors `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// News source returning a fixed article list
pub struct ScriptedNewsSource {
    pub articles: Vec<Article>,
}

impl ScriptedNewsSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Articles whose contents carry the given texts
    pub fn from_texts(texts: &[&str]) -> Self {
        let articles = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Article {
                title: format!("Article {i}"),
                content: (*text).to_string(),
                source: "Test Wire".to_string(),
                published_at: Utc::now(),
                url: format!("https://example.com/news-{i}"),
            })
            .collect();
        Self::new(articles)
    }
}

#[async_trait]
impl NewsSource for ScriptedNewsSource {
    async fn search(&self, _entity: &str, _time_range: &str) -> Result<Vec<Article>, NewsError> {
        Ok(self.articles.clone())
    }
}

/// News source that always fails
pub struct FailingNewsSource;

#[async_trait]
impl NewsSource for FailingNewsSource {
    async fn search(&self, _entity: &str, _time_range: &str) -> Result<Vec<Article>, NewsError> {
        Err(NewsError::Http("connection refused".to_string()))
    }
}

/// Document extractor that always fails
pub struct FailingExtractor;

#[async_trait]
impl DocumentExtractor for FailingExtractor {
    async fn extract_text(&self, _bytes: &[u8], _filename: &str) -> Result<String, ExtractError> {
        Err(ExtractError::DecodeFailed("corrupt document".to_string()))
    }
}

/// Generation client returning the same text for every request
pub struct CannedGenerativeClient {
    pub response: String,
}

impl CannedGenerativeClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl GenerativeClient for CannedGenerativeClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenAiError> {
        Ok(self.response.clone())
    }
}

/// Generation client that always fails
pub struct UnreachableGenerativeClient;

#[async_trait]
impl GenerativeClient for UnreachableGenerativeClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenAiError> {
        Err(GenAiError::Http("name resolution failed".to_string()))
    }
}

/// Config rooted in a fresh temp directory; keep the guard alive
pub fn temp_config() -> (PraConfig, TempDir) {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let config = PraConfig::new().with_data_dir(dir.path());
    (config, dir)
}

/// Orchestrator over a temp directory with default collaborators
pub fn setup_orchestrator() -> (Orchestrator, TempDir) {
    let (config, dir) = temp_config();
    let orchestrator = Orchestrator::builder(config)
        .build()
        .expect("orchestrator builds");
    (orchestrator, dir)
}

/// Orchestrator over a temp directory with a custom news source
pub fn setup_orchestrator_with_news(
    news: Arc<dyn NewsSource>,
) -> Result<(Orchestrator, TempDir), PraError> {
    let (config, dir) = temp_config();
    let orchestrator = Orchestrator::builder(config).with_news_source(news).build()?;
    Ok((orchestrator, dir))
}
