//! Orchestration of the full advisory pipeline: fetch, analyze, evaluate.

use crate::analysis::power_law::PowerLawModel;
use crate::analysis::sentiment::SentimentAnalyzer;
use crate::analysis::technical;
use crate::engine::Advisor;
use crate::error::AdvisorError;
use crate::models::recommendation::Recommendation;
use crate::models::sentiment::SentimentSnapshot;
use crate::models::technical::TechnicalSnapshot;
use crate::models::valuation::ValuationSnapshot;
use crate::services::cache::TtlCache;
use crate::services::market_data::PriceProvider;
use crate::services::news::NewsProvider;
use crate::services::social::SocialProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct AdvisorService {
    prices: Arc<dyn PriceProvider>,
    news: Arc<dyn NewsProvider>,
    social: Arc<dyn SocialProvider>,
    analyzer: SentimentAnalyzer,
    power_law: PowerLawModel,
    engine: Advisor,
    price_cache: TtlCache<f64>,
}

impl AdvisorService {
    pub fn new(
        prices: Arc<dyn PriceProvider>,
        news: Arc<dyn NewsProvider>,
        social: Arc<dyn SocialProvider>,
        price_cache_ttl: Duration,
    ) -> Self {
        Self {
            prices,
            news,
            social,
            analyzer: SentimentAnalyzer::new(),
            power_law: PowerLawModel::default(),
            engine: Advisor::default(),
            price_cache: TtlCache::new(price_cache_ttl),
        }
    }

    pub fn with_engine(mut self, engine: Advisor) -> Self {
        self.engine = engine;
        self
    }

    /// Current spot price, served from the short-TTL cache when fresh.
    pub async fn current_price(&self) -> Result<f64, AdvisorError> {
        if let Some(price) = self.price_cache.get().await {
            debug!(price, "price cache hit");
            return Ok(price);
        }
        let price = self.prices.current_price().await?;
        self.price_cache.set(price).await;
        Ok(price)
    }

    pub async fn technical_snapshot(
        &self,
        days: usize,
    ) -> Result<(TechnicalSnapshot, Vec<f64>), AdvisorError> {
        let history = self.prices.price_history(days).await?;
        let closes = history.closes();
        let snapshot = technical::analyze(&history.candles).ok_or(
            AdvisorError::InsufficientHistory {
                have: history.len(),
                need: technical::MIN_CANDLES,
            },
        )?;
        Ok((snapshot, closes))
    }

    pub async fn valuation_snapshot(&self, days: usize) -> Result<ValuationSnapshot, AdvisorError> {
        let history = self.prices.price_history(days).await?;
        self.power_law
            .analyze(&history)
            .ok_or(AdvisorError::InsufficientHistory { have: 0, need: 1 })
    }

    pub async fn news_sentiment(
        &self,
        days: usize,
        max_articles: usize,
    ) -> Result<SentimentSnapshot, AdvisorError> {
        let articles = self.news.fetch_articles(days, max_articles).await?;
        Ok(self.analyzer.analyze_articles(&articles))
    }

    pub async fn social_sentiment(&self, limit: usize) -> Result<SentimentSnapshot, AdvisorError> {
        let posts = self.social.fetch_posts(limit).await?;
        Ok(self.analyzer.analyze_articles(&posts))
    }

    /// Run the full pipeline and produce one recommendation.
    pub async fn recommend(
        &self,
        days: usize,
        news_days: usize,
        max_articles: usize,
    ) -> Result<Recommendation, AdvisorError> {
        let history = self.prices.price_history(days).await?;
        let closes = history.closes();
        let current_price = match self.current_price().await {
            Ok(price) => price,
            Err(_) => history
                .last_close()
                .ok_or_else(|| AdvisorError::MarketData("empty price history".to_string()))?,
        };

        let technical_snapshot = technical::analyze(&history.candles).ok_or(
            AdvisorError::InsufficientHistory {
                have: history.len(),
                need: technical::MIN_CANDLES,
            },
        )?;
        let valuation = self
            .power_law
            .analyze(&history)
            .ok_or(AdvisorError::InsufficientHistory { have: 0, need: 1 })?;

        let news_articles = self.news.fetch_articles(news_days, max_articles).await?;
        let news_sentiment = self.analyzer.analyze_articles(&news_articles);
        let posts = self.social.fetch_posts(max_articles).await?;
        let social_sentiment = self.analyzer.analyze_articles(&posts);

        info!(
            price = current_price,
            rsi = technical_snapshot.rsi.value,
            valuation = ?valuation.status,
            social = social_sentiment.average_compound,
            news = news_sentiment.average_compound,
            "evaluating recommendation"
        );

        self.engine.evaluate_with_history(
            &valuation,
            &technical_snapshot,
            &social_sentiment,
            &news_sentiment,
            current_price,
            &closes,
        )
    }
}
