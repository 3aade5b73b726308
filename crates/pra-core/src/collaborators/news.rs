//! News source collaborator
//!
//! The pipeline consumes news through the [`NewsSource`] trait and must
//! not depend on which implementation is wired in: a deterministic,
//! seedable generator for tests and development, or an HTTP-backed source
//! for production.

use crate::error::NewsError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Publishing outlet
    pub source: String,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// Canonical link
    pub url: String,
}

/// News retrieval interface
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch articles about `entity` within `time_range`
    async fn search(&self, entity: &str, time_range: &str) -> Result<Vec<Article>, NewsError>;
}

static TIME_RANGE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)").expect("literal pattern"));

/// Days covered by a time-range string; the first integer wins, default 7
#[must_use]
pub fn parse_time_range(time_range: &str) -> i64 {
    TIME_RANGE_DIGITS
        .captures(time_range)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(7)
}

/// Render articles as the numbered text block the narrative stage consumes
#[must_use]
pub fn format_articles_for_analysis(articles: &[Article]) -> String {
    let mut formatted = Vec::new();
    for (i, article) in articles.iter().enumerate() {
        formatted.push(format!("Article {}:", i + 1));
        formatted.push(format!("Title: {}", article.title));
        formatted.push(format!("Source: {}", article.source));
        formatted.push(format!("Date: {}", article.published_at.format("%Y-%m-%d")));
        let content: String = article.content.chars().take(300).collect();
        formatted.push(format!("Content: {content}..."));
        formatted.push(String::new());
    }
    formatted.join("\n")
}

/// Deterministic, seedable news generator
///
/// Produces category-matched articles for an entity: city coverage for
/// known city names, sector coverage for technology terms, market coverage
/// for finance terms, general coverage otherwise. The same seed and entity
/// always select the same articles in the same order.
#[derive(Debug, Clone)]
pub struct MockNewsSource {
    seed: u64,
    max_results: usize,
}

impl MockNewsSource {
    /// Generator with a fixed seed
    #[inline]
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_results: 10,
        }
    }

    /// With a result cap
    #[inline]
    #[must_use]
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[async_trait]
impl NewsSource for MockNewsSource {
    async fn search(&self, entity: &str, time_range: &str) -> Result<Vec<Article>, NewsError> {
        tracing::info!(entity, time_range, "searching news");
        let days = parse_time_range(time_range);
        let articles = generate_articles(entity, days, self.max_results, self.seed);
        tracing::info!(count = articles.len(), "news search complete");
        Ok(articles)
    }
}

const OUTLETS: &[&str] = &[
    "The Times",
    "Business Standard",
    "Economic Times",
    "Mint",
    "Reuters",
];

const CITY_NAMES: &[&str] = &[
    "delhi", "mumbai", "bangalore", "chennai", "kolkata", "hyderabad", "pune", "ahmedabad",
];

const TECH_TERMS: &[&str] = &["ai", "artificial intelligence", "tech", "technology", "startup", "software"];

const FINANCE_TERMS: &[&str] = &["stock", "market", "finance", "investment", "trading"];

fn generate_articles(entity: &str, days: i64, count: usize, seed: u64) -> Vec<Article> {
    let entity_lower = entity.to_lowercase();

    let mut templates: Vec<(String, String)> = if CITY_NAMES.iter().any(|c| entity_lower.contains(c)) {
        city_templates(entity)
    } else if TECH_TERMS.iter().any(|t| entity_lower.contains(t)) {
        tech_templates(entity)
    } else if FINANCE_TERMS.iter().any(|f| entity_lower.contains(f)) {
        finance_templates(entity)
    } else {
        general_templates(entity)
    };

    let mut rng = StdRng::seed_from_u64(seed);
    templates.shuffle(&mut rng);
    templates.truncate(count);

    templates
        .into_iter()
        .enumerate()
        .map(|(i, (title, content))| {
            let age = rng.random_range(0..=days.max(0));
            Article {
                title,
                content,
                source: OUTLETS[rng.random_range(0..OUTLETS.len())].to_string(),
                published_at: Utc::now() - Duration::days(age),
                url: format!("https://example.com/news-{i}"),
            }
        })
        .collect()
}

fn city_templates(entity: &str) -> Vec<(String, String)> {
    let city = entity.split_whitespace().next().unwrap_or(entity);
    vec![
        (
            format!("{city} Metro Expansion Project Reaches Major Milestone"),
            format!(
                "The {city} Metro Rail Corporation announced that the new line extension has reached a significant construction milestone. The project is expected to ease traffic congestion and provide sustainable transport for millions of commuters, connecting key commercial and residential areas across the city."
            ),
        ),
        (
            format!("{city} Emerges as Leading Tech Hub with Record Startup Funding"),
            format!(
                "{city} has witnessed record startup investments this year, attracting billions in venture capital across hundreds of startups. Industry leaders attribute this growth to improved infrastructure, a skilled talent pool, and supportive policies promoting innovation and entrepreneurship."
            ),
        ),
        (
            format!("Air Quality Concerns Prompt {city} Government to Launch Clean Air Initiative"),
            format!(
                "Responding to growing environmental concerns, the {city} municipal authority has unveiled a comprehensive clean air action plan including restrictions on older vehicles, increased green cover, and promotion of electric vehicles. Experts have welcomed the move, though some suggest more aggressive measures may be needed."
            ),
        ),
        (
            format!("{city} Real Estate Market Shows Mixed Signals Amid Economic Shifts"),
            format!(
                "The {city} property market is experiencing diverse trends across segments. Premium residential areas have seen price appreciation while mid-range segments remain stable. Commercial real estate faces challenges due to hybrid work models, and analysts suggest the market is in a transitional phase."
            ),
        ),
        (
            format!("Traffic Congestion Crisis: {city} Explores Smart Mobility Solutions"),
            format!(
                "With congestion costing the city heavily in lost productivity, {city} authorities are piloting smart traffic management systems with intelligent signal control and real-time monitoring. Early results from pilot zones show measurable improvement in traffic flow during peak hours."
            ),
        ),
    ]
}

fn tech_templates(entity: &str) -> Vec<(String, String)> {
    vec![
        (
            format!("{entity}: Breakthrough Model Achieves Strong Performance in Complex Tasks"),
            format!(
                "Researchers in the {entity} sector have unveiled a system demonstrating notable capabilities in reasoning and problem-solving, potentially transforming industries from healthcare to finance. Experts suggest this represents significant progress, though ethical considerations and regulatory frameworks remain subjects of debate."
            ),
        ),
        (
            format!("Major Investment Wave: {entity} Sector Attracts Record Funding"),
            format!(
                "The {entity} industry experienced its strongest quarter with record investment across hundreds of companies. Leading venture firms cite growth potential and transformative applications, while analysts warn about market saturation and emphasize sustainable business models over hype-driven valuations."
            ),
        ),
        (
            format!("{entity} Faces Regulatory Scrutiny Over Data Privacy and Ethics"),
            format!(
                "Authorities have launched investigations into {entity} practices regarding user data protection and algorithmic transparency. The probe follows widespread concerns about privacy violations, with industry leaders calling for balanced regulation that protects consumers while fostering innovation."
            ),
        ),
    ]
}

fn finance_templates(entity: &str) -> Vec<(String, String)> {
    vec![
        (
            format!("{entity} Reaches All-Time High Amid Strong Quarterly Results"),
            format!(
                "Markets responded enthusiastically as {entity} reported exceptional quarterly performance with revenue growth well above expectations, driving prices to record levels. Management attributed the success to strategic initiatives and favorable market conditions, announcing plans for continued expansion."
            ),
        ),
        (
            format!("Volatility Concerns: {entity} Experiences Correction After Sustained Rally"),
            format!(
                "After months of strong performance, {entity} faced a sharp correction as profit-taking and macroeconomic concerns weighed on investor sentiment. Analysts suggest the pullback is healthy consolidation rather than trend reversal, though technical indicators show mixed signals."
            ),
        ),
        (
            format!("{entity} Analyst Consensus Shifts to Bullish on Growth Prospects"),
            format!(
                "Leading financial institutions have upgraded their outlook on {entity}, citing improved market positioning and execution. Revised forecasts project strong growth supported by new launches and market expansion, though some analysts maintain reservations about valuation levels."
            ),
        ),
    ]
}

fn general_templates(entity: &str) -> Vec<(String, String)> {
    vec![
        (
            format!("{entity} Announces Major Strategic Initiative"),
            format!(
                "In a significant development, {entity} has unveiled an ambitious strategic plan focusing on innovation, sustainability, and expansion, with substantial investments in research and talent. Experts suggest this positions {entity} favorably for future growth, though execution will be critical."
            ),
        ),
        (
            format!("Expert Analysis: What's Next for {entity} in an Evolving Landscape"),
            format!(
                "Industry analysts are closely examining {entity}'s trajectory amid rapidly changing dynamics. While opportunities for growth abound, challenges including regulatory changes and competitive pressures require strategic navigation and forward-thinking leadership."
            ),
        ),
        (
            format!("{entity} Launches Sustainability Program Addressing Climate Concerns"),
            format!(
                "Responding to growing environmental awareness, {entity} has committed to comprehensive sustainability initiatives including carbon neutrality targets and renewable energy adoption. The program received positive reception, though critics argue for more aggressive timelines and measurable accountability."
            ),
        ),
    ]
}

/// HTTP-backed news source
///
/// Targets a NewsAPI-style endpoint. Production wiring; tests use
/// [`MockNewsSource`].
pub struct NewsApiSource {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiSource {
    /// Source against the given endpoint
    ///
    /// # Errors
    /// `NewsError::Http` when the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| NewsError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    articles: Option<Vec<NewsApiArticle>>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    source: Option<NewsApiOutlet>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<Utc>>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiOutlet {
    name: Option<String>,
}

#[async_trait]
impl NewsSource for NewsApiSource {
    async fn search(&self, entity: &str, time_range: &str) -> Result<Vec<Article>, NewsError> {
        let days = parse_time_range(time_range);
        let from = (Utc::now() - Duration::days(days)).format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", entity),
                ("from", from.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NewsError::Http(e.to_string()))?;

        let parsed: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Response(e.to_string()))?;

        if let Some(message) = parsed.message {
            return Err(NewsError::Response(message));
        }

        let articles = parsed
            .articles
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| {
                Some(Article {
                    title: a.title?,
                    content: a.content.or(a.description).unwrap_or_default(),
                    source: a.source.and_then(|s| s.name).unwrap_or_default(),
                    published_at: a.published_at.unwrap_or_else(Utc::now),
                    url: a.url.unwrap_or_default(),
                })
            })
            .collect();

        Ok(articles)
    }
}
