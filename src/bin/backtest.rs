//! Coinsage Backtest
//!
//! Drives the recommendation engine over a sliding window of historical
//! closes with neutral sentiment (no historical sentiment is available)
//! and reports the signal distribution plus a naive accuracy figure.

use coinsage::analysis::power_law::PowerLawModel;
use coinsage::analysis::technical;
use coinsage::engine::Advisor;
use coinsage::logging;
use coinsage::models::market::PriceHistory;
use coinsage::models::recommendation::Advice;
use coinsage::models::sentiment::SentimentSnapshot;
use coinsage::services::market_data::{CoinGeckoProvider, MockPriceProvider, PriceProvider};
use dotenvy::dotenv;
use std::env;
use tracing::{info, warn};

const WINDOW_SIZE: usize = 100;
const STEP_SIZE: usize = 7;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let backtest_days: usize = env::var("BACKTEST_DAYS")
        .ok()
        .and_then(|d| d.parse().ok())
        .unwrap_or(365);

    info!(
        days = backtest_days,
        window = WINDOW_SIZE,
        step = STEP_SIZE,
        "Starting backtest"
    );

    let provider: Box<dyn PriceProvider> = if coinsage::config::use_mock_data() {
        Box::new(MockPriceProvider::default())
    } else {
        Box::new(CoinGeckoProvider::new())
    };

    let history = provider.price_history(backtest_days + WINDOW_SIZE).await?;
    info!(candles = history.len(), "Retrieved history");

    let engine = Advisor::default();
    let power_law = PowerLawModel::default();
    let neutral = SentimentSnapshot::neutral();

    let mut results: Vec<(Advice, f64, f64)> = Vec::new();

    let mut start = 0usize;
    while start + WINDOW_SIZE + STEP_SIZE <= history.len() {
        let end = start + WINDOW_SIZE;
        let window = &history.candles[..end];
        let closes: Vec<f64> = window.iter().map(|c| c.close).collect();
        let current_price = closes[closes.len() - 1];

        let technical_snapshot = match technical::analyze(window) {
            Some(snapshot) => snapshot,
            None => {
                start += STEP_SIZE;
                continue;
            }
        };
        let valuation = match power_law.analyze(&PriceHistory::new(window.to_vec())) {
            Some(v) => v,
            None => {
                start += STEP_SIZE;
                continue;
            }
        };

        match engine.evaluate_with_history(
            &valuation,
            &technical_snapshot,
            &neutral,
            &neutral,
            current_price,
            &closes,
        ) {
            Ok(recommendation) => {
                let future_price = history.candles[end + STEP_SIZE - 1].close;
                let change_pct = (future_price - current_price) / current_price * 100.0;
                results.push((recommendation.recommendation, change_pct, current_price));
            }
            Err(e) => warn!(error = %e, "Evaluation failed for window"),
        }

        start += STEP_SIZE;
    }

    if results.is_empty() {
        warn!("No backtest iterations completed");
        return Ok(());
    }

    let buys = results
        .iter()
        .filter(|(a, _, _)| a.is_buy_family())
        .count();
    let sells = results
        .iter()
        .filter(|(a, _, _)| a.is_sell_family())
        .count();
    let holds = results.len() - buys - sells;

    let correct = results
        .iter()
        .filter(|(advice, change, _)| {
            (advice.is_buy_family() && *change > 0.0)
                || (advice.is_sell_family() && *change < 0.0)
                || (!advice.is_buy_family() && !advice.is_sell_family() && change.abs() < 2.0)
        })
        .count();
    let accuracy = correct as f64 / results.len() as f64 * 100.0;

    println!("Backtest complete: {} iterations", results.len());
    println!(
        "  Buy signals:  {} ({:.1}%)",
        buys,
        buys as f64 / results.len() as f64 * 100.0
    );
    println!(
        "  Sell signals: {} ({:.1}%)",
        sells,
        sells as f64 / results.len() as f64 * 100.0
    );
    println!(
        "  Hold/other:   {} ({:.1}%)",
        holds,
        holds as f64 / results.len() as f64 * 100.0
    );
    println!("  Naive accuracy (7-day horizon): {:.1}%", accuracy);

    Ok(())
}
