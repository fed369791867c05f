//! Typed contract for the per-source sentiment adapter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceAdvice {
    Buy,
    Sell,
    Hold,
}

impl SourceAdvice {
    /// Numeric direction used by the legacy source blend.
    pub fn direction(&self) -> f64 {
        match self {
            SourceAdvice::Buy => 1.0,
            SourceAdvice::Sell => -1.0,
            SourceAdvice::Hold => 0.0,
        }
    }
}

/// Aggregate sentiment for one source (social forum or news).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// Mean compound polarity in [-1, 1].
    pub average_compound: f64,
    pub overall_sentiment: SentimentLabel,
    pub recommendation: SourceAdvice,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub article_count: usize,
}

impl SentimentSnapshot {
    /// A neutral snapshot, used when a source has no data (e.g. backtests
    /// without historical sentiment).
    pub fn neutral() -> Self {
        Self {
            average_compound: 0.0,
            overall_sentiment: SentimentLabel::Neutral,
            recommendation: SourceAdvice::Hold,
            confidence: 0.5,
            article_count: 0,
        }
    }

    /// The compound polarity mapped onto a [0, 1] euphoria scale where 0 is
    /// maximum fear and 1 maximum euphoria. The contrarian thresholds are
    /// defined on this scale.
    pub fn euphoria_level(&self) -> f64 {
        (self.average_compound + 1.0) / 2.0
    }
}
