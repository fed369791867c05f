//! Typed contract for the long-horizon valuation adapter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorStatus {
    DeepValue,
    FairValueZone,
    BubbleRisk,
}

impl CorridorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorridorStatus::DeepValue => "Deep Value",
            CorridorStatus::FairValueZone => "Fair Value Zone",
            CorridorStatus::BubbleRisk => "Bubble Risk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub status: CorridorStatus,
    /// Model fair value, strictly positive.
    pub fair_value: f64,
    pub support_value: f64,
    pub resistance_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_reversion_narrative: Option<String>,
}

impl ValuationSnapshot {
    /// Signed deviation of `price` from fair value, in percent.
    pub fn deviation_pct(&self, price: f64) -> f64 {
        (price - self.fair_value) / self.fair_value * 100.0
    }
}
