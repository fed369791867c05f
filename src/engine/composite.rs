//! Composite scorer: the weighted blend over the active factor set.

use crate::models::recommendation::SignalBundle;
use crate::models::sentiment::SentimentSnapshot;

use super::weights::{FactorWeights, LegacyWeights};

/// Weighted sum of the five factor scores. Pure; no normalization beyond
/// the weight-sum invariant enforced at construction.
pub fn composite_score(bundle: &SignalBundle, weights: &FactorWeights) -> f64 {
    bundle.rsi.score * weights.rsi
        + bundle.moving_averages.score * weights.moving_averages
        + bundle.power_law.score * weights.power_law
        + bundle.macd.score * weights.macd
        + bundle.sentiment.score * weights.sentiment
}

/// Legacy source blend: each source's own advice mapped to a direction and
/// scaled by its confidence, then weighted.
pub fn legacy_composite(
    social: &SentimentSnapshot,
    news: &SentimentSnapshot,
    technical_direction: f64,
    technical_confidence: f64,
    weights: &LegacyWeights,
) -> f64 {
    let reddit_score = social.recommendation.direction() * social.confidence;
    let news_score = news.recommendation.direction() * news.confidence;
    let technical_score = technical_direction * technical_confidence;

    reddit_score * weights.reddit + news_score * weights.news + technical_score * weights.technical
}
