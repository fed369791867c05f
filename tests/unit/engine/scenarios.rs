//! End-to-end engine scenarios

use crate::common;
use coinsage::engine::{Advisor, LegacyWeights, WeightProfile};
use coinsage::error::AdvisorError;
use coinsage::models::recommendation::{Advice, TargetSet};
use coinsage::models::technical::{MacdSignal, MaTrend};
use coinsage::models::valuation::CorridorStatus;

#[test]
fn evaluation_is_deterministic() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::technical(35.0, MacdSignal::Bullish, 200.0, MaTrend::Bullish, false);
    let social = common::sentiment(0.2);
    let news = common::sentiment(0.1);

    let first = advisor
        .evaluate(&valuation, &technical, &social, &news, 105.0)
        .unwrap();
    let second = advisor
        .evaluate(&valuation, &technical, &social, &news, 105.0)
        .unwrap();

    assert_eq!(first.recommendation, second.recommendation);
    assert_eq!(first.composite_score, second.composite_score);
    assert_eq!(first.confidence, second.confidence);
    assert_eq!(first.reasoning, second.reasoning);
}

#[test]
fn gate_precedes_even_extreme_technicals() {
    // Overbought RSI and bubble-risk valuation would scream sell, but the
    // euphoric social feed short-circuits everything.
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::BubbleRisk, 100.0);
    let technical = common::technical(95.0, MacdSignal::Bearish, -900.0, MaTrend::StrongBearish, false);
    let social = common::sentiment(0.90);
    let news = common::sentiment(0.0);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 450.0)
        .unwrap();

    assert_eq!(result.recommendation, Advice::ContrarianAlert);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.alert_type.as_deref(), Some("Extreme Euphoria"));
    assert!(result.composite_score.is_none());
    assert!(result.factor_scores.is_none());
}

#[test]
fn oversold_deep_value_market_is_a_buy() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::DeepValue, 100.0);
    let technical =
        common::technical(25.0, MacdSignal::Bullish, 500.0, MaTrend::StrongBullish, true);
    let social = common::sentiment(0.4);
    let news = common::sentiment(0.3);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 70.0)
        .unwrap();

    let bundle = result.factor_scores.as_ref().unwrap();
    for score in bundle.scores() {
        assert!(score > 0.0, "expected all factor scores positive");
    }
    assert!(result.composite_score.unwrap() > 0.3);
    assert!(matches!(
        result.recommendation,
        Advice::Buy | Advice::StrongBuy
    ));
}

#[test]
fn euphoria_with_neutral_technicals_raises_the_alert() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let social = common::sentiment(0.92);
    let news = common::sentiment(0.0);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 100.0)
        .unwrap();

    assert_eq!(result.recommendation, Advice::ContrarianAlert);
    assert_eq!(result.alert_type.as_deref(), Some("Extreme Euphoria"));
    assert_eq!(result.confidence, 1.0);
    match result.targets {
        TargetSet::Neutral {
            support,
            resistance,
            ..
        } => {
            assert_eq!(support, 95.0);
            assert_eq!(resistance, 105.0);
        }
        _ => panic!("alerts carry the neutral band"),
    }
}

#[test]
fn capitulation_raises_the_fear_alert() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let social = common::sentiment(-0.95);
    let news = common::sentiment(-0.2);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 100.0)
        .unwrap();

    assert_eq!(result.recommendation, Advice::ContrarianAlert);
    assert_eq!(result.alert_type.as_deref(), Some("Extreme Fear"));
}

#[test]
fn every_factor_score_stays_bounded() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::BubbleRisk, 100.0);
    let technical = common::technical(
        99.0,
        MacdSignal::Bearish,
        -50_000.0,
        MaTrend::StrongBearish,
        false,
    );
    let social = common::sentiment(-0.6);
    let news = common::sentiment(-0.6);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 900.0)
        .unwrap();

    let bundle = result.factor_scores.as_ref().unwrap();
    for score in bundle.scores() {
        assert!((-1.0..=1.0).contains(&score));
    }
    let composite = result.composite_score.unwrap();
    assert!((-1.0..=1.0).contains(&composite));
}

#[test]
fn divergence_note_folds_into_reasoning() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let social = common::sentiment(-0.2);
    let news = common::sentiment(0.0);
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();

    let result = advisor
        .evaluate_with_history(&valuation, &technical, &social, &news, 139.0, &closes)
        .unwrap();

    assert!(result.reasoning.contains("BEARISH DIVERGENCE"));
    // Informational only: the recommendation still comes from the blend
    assert_ne!(result.recommendation, Advice::ContrarianAlert);
}

#[test]
fn short_history_degrades_to_a_note() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let social = common::sentiment(0.0);
    let news = common::sentiment(0.0);
    let closes = vec![100.0; 10];

    let result = advisor
        .evaluate_with_history(&valuation, &technical, &social, &news, 100.0, &closes)
        .unwrap();

    assert!(result.reasoning.contains("Not enough data"));
}

#[test]
fn out_of_range_rsi_fails_loudly() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let mut technical = common::neutral_technical();
    technical.rsi.value = 150.0;

    let result = advisor.evaluate(
        &valuation,
        &technical,
        &common::sentiment(0.0),
        &common::sentiment(0.0),
        100.0,
    );
    assert!(matches!(result, Err(AdvisorError::OutOfRange { .. })));
}

#[test]
fn non_positive_price_fails_loudly() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();

    let result = advisor.evaluate(
        &valuation,
        &technical,
        &common::sentiment(0.0),
        &common::sentiment(0.0),
        -5.0,
    );
    assert!(matches!(result, Err(AdvisorError::OutOfRange { .. })));
}

#[test]
fn out_of_range_compound_fails_loudly() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let mut social = common::sentiment(0.0);
    social.average_compound = 1.5;

    let result = advisor.evaluate(
        &valuation,
        &technical,
        &social,
        &common::sentiment(0.0),
        100.0,
    );
    assert!(matches!(result, Err(AdvisorError::OutOfRange { .. })));
}

#[test]
fn legacy_profile_blends_source_votes() {
    let weights = LegacyWeights::new(0.4, 0.3, 0.3).unwrap();
    let advisor = Advisor::new(WeightProfile::Legacy(weights));
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::technical(25.0, MacdSignal::Bullish, 100.0, MaTrend::Neutral, false);
    let mut social = common::sentiment(0.4);
    social.confidence = 1.0;
    let mut news = common::sentiment(0.3);
    news.confidence = 1.0;

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 100.0)
        .unwrap();

    // All three sources vote buy at full confidence
    assert_eq!(result.recommendation, Advice::StrongBuy);
    assert_eq!(result.composite_score, Some(1.0));
    assert!(result.factor_scores.is_none());
}

#[test]
fn legacy_gate_still_takes_precedence() {
    let weights = LegacyWeights::new(0.4, 0.3, 0.3).unwrap();
    let advisor = Advisor::new(WeightProfile::Legacy(weights));
    let valuation = common::valuation(CorridorStatus::FairValueZone, 100.0);
    let technical = common::neutral_technical();
    let social = common::sentiment(0.95);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &common::sentiment(0.0), 100.0)
        .unwrap();
    assert_eq!(result.recommendation, Advice::ContrarianAlert);
}

#[test]
fn reasoning_orders_valuation_before_oscillators() {
    let advisor = Advisor::default();
    let valuation = common::valuation(CorridorStatus::DeepValue, 100.0);
    let technical = common::technical(25.0, MacdSignal::Bullish, 100.0, MaTrend::Bullish, false);
    let social = common::sentiment(0.2);
    let news = common::sentiment(0.2);

    let result = advisor
        .evaluate(&valuation, &technical, &social, &news, 70.0)
        .unwrap();

    let power_law_at = result.reasoning.find("Power law").unwrap();
    let rsi_at = result.reasoning.find("RSI").unwrap();
    assert!(power_law_at < rsi_at);

    let factors: Vec<&str> = result
        .factor_reasons
        .iter()
        .map(|r| r.factor.as_str())
        .collect();
    assert_eq!(
        factors,
        vec!["power_law", "moving_averages", "rsi", "macd", "sentiment"]
    );
}
