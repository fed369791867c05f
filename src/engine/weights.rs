//! Weight sets for the two blending modes.

use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Weights of the five-factor holistic blend. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorWeights {
    pub rsi: f64,
    pub moving_averages: f64,
    pub power_law: f64,
    pub macd: f64,
    pub sentiment: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            rsi: 0.20,
            moving_averages: 0.25,
            power_law: 0.25,
            macd: 0.15,
            sentiment: 0.15,
        }
    }
}

impl FactorWeights {
    pub fn new(
        rsi: f64,
        moving_averages: f64,
        power_law: f64,
        macd: f64,
        sentiment: f64,
    ) -> Result<Self, String> {
        let weights = [rsi, moving_averages, power_law, macd, sentiment];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err("all weights must be between 0 and 1".to_string());
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got: {}", total));
        }
        Ok(Self {
            rsi,
            moving_averages,
            power_law,
            macd,
            sentiment,
        })
    }
}

/// Caller-supplied weights of the legacy source blend (technical vs. news
/// vs. social). The two-source form passes 0.0 for the unused share.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LegacyWeights {
    pub reddit: f64,
    pub news: f64,
    pub technical: f64,
}

impl LegacyWeights {
    pub fn new(reddit: f64, news: f64, technical: f64) -> Result<Self, String> {
        let weights = [reddit, news, technical];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err("all weights must be between 0 and 1".to_string());
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got: {}", total));
        }
        Ok(Self {
            reddit,
            news,
            technical,
        })
    }
}

impl Default for LegacyWeights {
    fn default() -> Self {
        Self {
            reddit: 0.4,
            news: 0.3,
            technical: 0.3,
        }
    }
}

/// The declared active factor set and weight map. One engine, two blending
/// modes; no duplicated code paths downstream of the composite stage.
#[derive(Debug, Clone, Copy)]
pub enum WeightProfile {
    Holistic(FactorWeights),
    Legacy(LegacyWeights),
}

impl Default for WeightProfile {
    fn default() -> Self {
        WeightProfile::Holistic(FactorWeights::default())
    }
}
