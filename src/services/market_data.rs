//! Price data providers.

use crate::error::AdvisorError;
use crate::models::market::{Candle, PriceHistory};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Latest spot price in USD.
    async fn current_price(&self) -> Result<f64, AdvisorError>;

    /// Daily history, oldest candle first.
    async fn price_history(&self, days: usize) -> Result<PriceHistory, AdvisorError>;
}

/// CoinGecko market data. The chart endpoint only returns closes, so OHLC
/// is approximated from them.
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
}

const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: SimplePriceEntry,
}

#[derive(Debug, Deserialize)]
struct SimplePriceEntry {
    usd: f64,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
    total_volumes: Vec<(i64, f64)>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AdvisorError> {
        let url = format!("{}{}", self.base_url, path);
        let fetch = || async {
            self.client
                .get(&url)
                .query(query)
                .send()
                .await?
                .error_for_status()?
                .json::<T>()
                .await
        };

        fetch
            .retry(ExponentialBuilder::default().with_max_times(3))
            .await
            .map_err(|e| AdvisorError::MarketData(format!("{}: {}", url, e)))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    async fn current_price(&self) -> Result<f64, AdvisorError> {
        let response: SimplePriceResponse = self
            .get_json(
                "/simple/price",
                &[
                    ("ids", "bitcoin".to_string()),
                    ("vs_currencies", "usd".to_string()),
                ],
            )
            .await?;
        Ok(response.bitcoin.usd)
    }

    async fn price_history(&self, days: usize) -> Result<PriceHistory, AdvisorError> {
        let response: MarketChartResponse = self
            .get_json(
                "/coins/bitcoin/market_chart",
                &[
                    ("vs_currency", "usd".to_string()),
                    ("days", days.to_string()),
                    ("interval", "daily".to_string()),
                ],
            )
            .await?;

        let candles = response
            .prices
            .iter()
            .enumerate()
            .map(|(i, (ms, close))| {
                let volume = response
                    .total_volumes
                    .get(i)
                    .map(|(_, v)| *v)
                    .unwrap_or(0.0);
                let timestamp =
                    DateTime::<Utc>::from_timestamp_millis(*ms).unwrap_or_else(Utc::now);
                Candle::new(*close, *close, *close, *close, volume, timestamp)
            })
            .collect();

        Ok(PriceHistory::new(candles))
    }
}

/// Deterministic synthetic prices for offline runs and tests.
pub struct MockPriceProvider {
    base_price: f64,
}

impl MockPriceProvider {
    pub fn new(base_price: f64) -> Self {
        Self { base_price }
    }
}

impl Default for MockPriceProvider {
    fn default() -> Self {
        Self::new(65_000.0)
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    async fn current_price(&self) -> Result<f64, AdvisorError> {
        Ok(self.base_price)
    }

    async fn price_history(&self, days: usize) -> Result<PriceHistory, AdvisorError> {
        let now = Utc::now();
        let candles = (0..days)
            .map(|i| {
                // Gentle uptrend with a repeating swing, anchored so the
                // final close lands on the configured base price.
                let remaining = (days - 1 - i) as f64;
                let swing = (i as f64 * 0.4).sin() * self.base_price * 0.01;
                let close = self.base_price - remaining * self.base_price * 0.0005 + swing;
                let timestamp = now - Duration::days(remaining as i64);
                Candle::new(
                    close * 0.998,
                    close * 1.004,
                    close * 0.995,
                    close,
                    1_000_000.0 + i as f64 * 1_000.0,
                    timestamp,
                )
            })
            .collect();
        Ok(PriceHistory::new(candles))
    }
}
