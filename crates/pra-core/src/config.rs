//! PRA configuration
//!
//! One configuration value carried by the orchestrator, covering storage
//! locations, pipeline defaults and the optional generation capability.

use std::path::{Path, PathBuf};

/// PRA configuration
#[derive(Debug, Clone)]
pub struct PraConfig {
    /// Directory holding persisted models
    pub model_dir: PathBuf,
    /// Directory chart artifacts are written to
    pub charts_dir: PathBuf,
    /// Directory report artifacts are written to
    pub reports_dir: PathBuf,
    /// Time range applied when neither caller nor plan supplies one
    pub default_time_range: String,
    /// Days forecast ahead for news tasks
    pub forecast_horizon: usize,
    /// Maximum articles fetched per news task
    pub max_articles: usize,
    /// Generation capability settings; an empty API key means absent
    pub generation: GenerationConfig,
}

impl PraConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root all storage directories under `dir`
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.model_dir = dir.join("models");
        self.charts_dir = dir.join("charts");
        self.reports_dir = dir.join("reports");
        self
    }

    /// With a forecast horizon
    #[inline]
    #[must_use]
    pub fn with_forecast_horizon(mut self, days: usize) -> Self {
        self.forecast_horizon = days;
        self
    }

    /// With generation settings
    #[inline]
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Path of the persisted sentiment model
    #[inline]
    #[must_use]
    pub fn sentiment_model_path(&self) -> PathBuf {
        self.model_dir.join("sentiment_model.json")
    }
}

impl Default for PraConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("./data/models"),
            charts_dir: PathBuf::from("./data/charts"),
            reports_dir: PathBuf::from("./data/reports"),
            default_time_range: "last_7_days".to_string(),
            forecast_horizon: 7,
            max_articles: 10,
            generation: GenerationConfig::default(),
        }
    }
}

/// Generation capability settings
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API key; empty means the capability is absent
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Chat-completions endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Whether a generation capability is configured
    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4-turbo-preview".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_roots_all_paths() {
        let config = PraConfig::new().with_data_dir("/tmp/pra");
        assert_eq!(config.model_dir, PathBuf::from("/tmp/pra/models"));
        assert_eq!(config.charts_dir, PathBuf::from("/tmp/pra/charts"));
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/pra/reports"));
        assert!(config
            .sentiment_model_path()
            .ends_with("models/sentiment_model.json"));
    }

    #[test]
    fn generation_absent_by_default() {
        assert!(!PraConfig::default().generation.is_configured());
    }
}
