//! News article providers.

use crate::analysis::sentiment::Article;
use crate::error::AdvisorError;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{Duration, Utc};
use serde::Deserialize;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch_articles(
        &self,
        days: usize,
        max_articles: usize,
    ) -> Result<Vec<Article>, AdvisorError>;
}

const NEWSAPI_BASE: &str = "https://newsapi.org/v2";
const QUERY: &str = "bitcoin OR btc OR cryptocurrency";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    source: NewsApiSource,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

pub struct NewsApiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, NEWSAPI_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    async fn fetch_articles(
        &self,
        days: usize,
        max_articles: usize,
    ) -> Result<Vec<Article>, AdvisorError> {
        let url = format!("{}/everything", self.base_url);
        let from = (Utc::now() - Duration::days(days as i64))
            .format("%Y-%m-%d")
            .to_string();

        let fetch = || async {
            self.client
                .get(&url)
                .query(&[
                    ("q", QUERY.to_string()),
                    ("from", from.clone()),
                    ("pageSize", max_articles.min(100).to_string()),
                    ("sortBy", "publishedAt".to_string()),
                    ("language", "en".to_string()),
                ])
                .header("X-Api-Key", &self.api_key)
                .send()
                .await?
                .error_for_status()?
                .json::<NewsApiResponse>()
                .await
        };

        let response = fetch
            .retry(ExponentialBuilder::default().with_max_times(3))
            .await
            .map_err(|e| AdvisorError::News(format!("{}: {}", url, e)))?;

        Ok(response
            .articles
            .into_iter()
            .filter_map(|a| {
                let title = a.title?;
                Some(Article {
                    title,
                    description: a.description.unwrap_or_default(),
                    source: a.source.name.unwrap_or_default(),
                    url: a.url.unwrap_or_default(),
                })
            })
            .take(max_articles)
            .collect())
    }
}

/// Canned headlines for offline runs and tests.
pub struct MockNewsProvider;

#[async_trait]
impl NewsProvider for MockNewsProvider {
    async fn fetch_articles(
        &self,
        _days: usize,
        max_articles: usize,
    ) -> Result<Vec<Article>, AdvisorError> {
        let samples = [
            (
                "Bitcoin Soars to New All-Time High",
                "Bitcoin price surges past previous records as institutional demand grows.",
            ),
            (
                "Regulatory Concerns Shake Crypto Market",
                "New regulations cause uncertainty among Bitcoin investors.",
            ),
            (
                "Bitcoin Adoption Increases in Developing Nations",
                "More countries are embracing Bitcoin as legal tender.",
            ),
            (
                "Expert Analysis: Bitcoin Price Prediction",
                "Analysts discuss potential Bitcoin price movements for next quarter.",
            ),
            (
                "Institutional Investors Accumulate Bitcoin",
                "Large funds report growth in digital asset allocations.",
            ),
        ];

        Ok(samples
            .iter()
            .take(max_articles)
            .map(|(title, description)| Article {
                title: title.to_string(),
                description: description.to_string(),
                source: "mock".to_string(),
                url: String::new(),
            })
            .collect())
    }
}
