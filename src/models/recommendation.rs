//! Engine output types.

use crate::engine::weights::FactorWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    ContrarianAlert,
}

impl Advice {
    pub fn is_buy_family(&self) -> bool {
        matches!(self, Advice::Buy | Advice::StrongBuy)
    }

    pub fn is_sell_family(&self) -> bool {
        matches!(self, Advice::Sell | Advice::StrongSell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Advice::StrongBuy => "strong_buy",
            Advice::Buy => "buy",
            Advice::Hold => "hold",
            Advice::Sell => "sell",
            Advice::StrongSell => "strong_sell",
            Advice::ContrarianAlert => "contrarian_alert",
        }
    }
}

/// Normalized score for one signal family, plus its rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    /// Bounded to [-1, 1].
    pub score: f64,
    pub label: String,
}

impl FactorScore {
    pub fn new(score: f64, label: impl Into<String>) -> Self {
        Self {
            score,
            label: label.into(),
        }
    }
}

/// The five factor scores of one evaluation. The fixed factor set is
/// enforced by the struct shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBundle {
    pub rsi: FactorScore,
    pub moving_averages: FactorScore,
    pub power_law: FactorScore,
    pub macd: FactorScore,
    pub sentiment: FactorScore,
}

impl SignalBundle {
    /// Factors in composition order: valuation/macro first, then trend,
    /// then oscillators, then sentiment.
    pub fn ordered(&self) -> [(&'static str, &FactorScore); 5] {
        [
            ("power_law", &self.power_law),
            ("moving_averages", &self.moving_averages),
            ("rsi", &self.rsi),
            ("macd", &self.macd),
            ("sentiment", &self.sentiment),
        ]
    }

    pub fn scores(&self) -> [f64; 5] {
        [
            self.rsi.score,
            self.moving_averages.score,
            self.power_law.score,
            self.macd.score,
            self.sentiment.score,
        ]
    }
}

/// Illustrative price levels derived from the recommendation; a band, not
/// a forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSet {
    Directional {
        entry: f64,
        target_1: f64,
        target_2: f64,
        stop_loss: f64,
    },
    Neutral {
        entry: f64,
        support: f64,
        resistance: f64,
    },
}

/// One structured reasoning record for programmatic consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorReason {
    pub factor: String,
    pub score: f64,
    pub summary: String,
}

/// The engine's output. Constructed once per evaluation, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: Advice,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_scores: Option<SignalBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_weights: Option<FactorWeights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    pub targets: TargetSet,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub factor_reasons: Vec<FactorReason>,
    pub current_price: f64,
    pub timestamp: DateTime<Utc>,
}
