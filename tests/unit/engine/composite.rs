//! Unit tests for the composite scorer

use crate::common;
use coinsage::engine::composite::{composite_score, legacy_composite};
use coinsage::engine::weights::{FactorWeights, LegacyWeights};
use coinsage::models::recommendation::{FactorScore, SignalBundle};

fn bundle(rsi: f64, ma: f64, pl: f64, macd: f64, sentiment: f64) -> SignalBundle {
    SignalBundle {
        rsi: FactorScore::new(rsi, "rsi"),
        moving_averages: FactorScore::new(ma, "ma"),
        power_law: FactorScore::new(pl, "pl"),
        macd: FactorScore::new(macd, "macd"),
        sentiment: FactorScore::new(sentiment, "sentiment"),
    }
}

#[test]
fn composite_is_the_weighted_sum() {
    let weights = FactorWeights::default();
    let b = bundle(0.5, 1.0, 1.0, 0.5, 0.2);
    let expected = 0.5 * 0.20 + 1.0 * 0.25 + 1.0 * 0.25 + 0.5 * 0.15 + 0.2 * 0.15;
    assert!((composite_score(&b, &weights) - expected).abs() < 1e-9);
}

#[test]
fn composite_stays_bounded_at_extremes() {
    let weights = FactorWeights::default();
    assert!((composite_score(&bundle(1.0, 1.0, 1.0, 1.0, 1.0), &weights) - 1.0).abs() < 0.011);
    assert!((composite_score(&bundle(-1.0, -1.0, -1.0, -1.0, -1.0), &weights) + 1.0).abs() < 0.011);
}

#[test]
fn composite_of_neutral_bundle_is_zero() {
    let weights = FactorWeights::default();
    assert_eq!(composite_score(&bundle(0.0, 0.0, 0.0, 0.0, 0.0), &weights), 0.0);
}

#[test]
fn legacy_blend_weights_sources_by_confidence() {
    let weights = LegacyWeights::new(0.4, 0.3, 0.3).unwrap();
    let mut social = common::sentiment(0.4);
    social.confidence = 1.0;
    let mut news = common::sentiment(0.3);
    news.confidence = 0.5;

    // social buy (1.0 * 1.0) * 0.4 + news buy (1.0 * 0.5) * 0.3 + technical buy (1.0) * 0.3
    let score = legacy_composite(&social, &news, 1.0, 1.0, &weights);
    assert!((score - (0.4 + 0.15 + 0.3)).abs() < 1e-9);
}

#[test]
fn legacy_blend_opposing_sources_cancel() {
    let weights = LegacyWeights::new(0.5, 0.5, 0.0).unwrap();
    let mut social = common::sentiment(0.4);
    social.confidence = 0.8;
    let mut news = common::sentiment(-0.4);
    news.confidence = 0.8;

    let score = legacy_composite(&social, &news, 0.0, 0.5, &weights);
    assert!(score.abs() < 1e-9);
}
