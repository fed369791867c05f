//! Social forum (Reddit) post providers.

use crate::analysis::sentiment::Article;
use crate::error::AdvisorError;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::Deserialize;

#[async_trait]
pub trait SocialProvider: Send + Sync {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Article>, AdvisorError>;
}

const REDDIT_BASE: &str = "https://www.reddit.com";
const USER_AGENT: &str = "coinsage/0.1 (advisor bot)";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    permalink: String,
}

pub struct RedditProvider {
    client: reqwest::Client,
    base_url: String,
    subreddit: String,
}

impl RedditProvider {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self::with_base_url(subreddit, REDDIT_BASE)
    }

    pub fn with_base_url(subreddit: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client");
        Self {
            client,
            base_url: base_url.into(),
            subreddit: subreddit.into(),
        }
    }
}

impl Default for RedditProvider {
    fn default() -> Self {
        Self::new("Bitcoin")
    }
}

#[async_trait]
impl SocialProvider for RedditProvider {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Article>, AdvisorError> {
        let url = format!("{}/r/{}/hot.json", self.base_url, self.subreddit);

        let fetch = || async {
            self.client
                .get(&url)
                .query(&[("limit", limit.min(100).to_string())])
                .send()
                .await?
                .error_for_status()?
                .json::<Listing>()
                .await
        };

        let listing = fetch
            .retry(ExponentialBuilder::default().with_max_times(3))
            .await
            .map_err(|e| AdvisorError::Social(format!("{}: {}", url, e)))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .take(limit)
            .map(|child| Article {
                title: child.data.title,
                description: child.data.selftext,
                source: format!("r/{}", self.subreddit),
                url: child.data.permalink,
            })
            .collect())
    }
}

/// Canned posts for offline runs and tests.
pub struct MockSocialProvider;

#[async_trait]
impl SocialProvider for MockSocialProvider {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Article>, AdvisorError> {
        let samples = [
            "Holding through the dip, adoption keeps growing",
            "Daily discussion: market looking strong this week",
            "Concern about exchange outflows, anyone else watching?",
            "New record hash rate, miners are optimistic",
            "Just moved my savings to cold storage",
        ];

        Ok(samples
            .iter()
            .take(limit)
            .map(|title| Article {
                title: title.to_string(),
                description: String::new(),
                source: "r/Bitcoin".to_string(),
                url: String::new(),
            })
            .collect())
    }
}
