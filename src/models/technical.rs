//! Typed contract for the technical-indicator adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map key of the long-horizon EMA (21-week span on daily candles).
pub const LONG_HORIZON_EMA: &str = "ema_147";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    BullishCrossover,
    Bearish,
    BearishCrossover,
    Neutral,
}

impl MacdSignal {
    pub fn is_bullish(&self) -> bool {
        matches!(self, MacdSignal::Bullish | MacdSignal::BullishCrossover)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, MacdSignal::Bearish | MacdSignal::BearishCrossover)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaTrend {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceVsMa {
    Above,
    Below,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiReading {
    /// RSI value in [0, 100].
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdReading {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
    pub signal: MacdSignal,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MaCrossovers {
    pub golden_cross: bool,
    pub death_cross: bool,
    pub short_term_bullish_cross: bool,
    pub short_term_bearish_cross: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingAverageEntry {
    pub value: f64,
    pub price_vs_ma: PriceVsMa,
    pub distance_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub rsi: RsiReading,
    pub macd: MacdReading,
    pub ma_trend: MaTrend,
    pub ma_crossovers: MaCrossovers,
    /// Keyed as "{sma|ema}_{period}", e.g. "sma_50".
    #[serde(default)]
    pub moving_averages: BTreeMap<String, MovingAverageEntry>,
}

impl TechnicalSnapshot {
    /// The long-horizon EMA value, if enough history was available to
    /// compute it. Absence skips the support-band contribution in the
    /// moving-average factor.
    pub fn long_horizon_ema(&self) -> Option<f64> {
        self.moving_averages.get(LONG_HORIZON_EMA).map(|e| e.value)
    }
}
