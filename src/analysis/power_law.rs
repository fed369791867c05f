//! Bitcoin power-law corridor model.
//!
//! Fair value follows `10^-17 * days^5.8` with `days` counted from the
//! genesis block. The corridor bands sit a fixed offset away in log10
//! space; 0.6 puts resistance at roughly 4x fair value and support at a
//! quarter of it.

use crate::models::market::PriceHistory;
use crate::models::valuation::{CorridorStatus, ValuationSnapshot};
use chrono::{DateTime, NaiveDate, Utc};

const LOG_COEFFICIENT: f64 = -17.0;
const EXPONENT: f64 = 5.8;

pub struct PowerLawModel {
    corridor_offset: f64,
}

impl Default for PowerLawModel {
    fn default() -> Self {
        Self {
            corridor_offset: 0.6,
        }
    }
}

impl PowerLawModel {
    pub fn new(corridor_offset: f64) -> Self {
        Self { corridor_offset }
    }

    fn genesis() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2009, 1, 3)
            .expect("valid genesis date")
            .and_hms_opt(0, 0, 0)
            .expect("valid genesis time")
            .and_utc()
    }

    /// Model fair value at a point in time.
    pub fn fair_value_at(&self, when: DateTime<Utc>) -> f64 {
        let days = (when - Self::genesis()).num_days().max(1) as f64;
        let log_price = LOG_COEFFICIENT + EXPONENT * days.log10();
        10f64.powf(log_price)
    }

    /// Analyze the latest close against the corridor.
    pub fn analyze(&self, history: &PriceHistory) -> Option<ValuationSnapshot> {
        let last = history.candles.last()?;
        Some(self.analyze_price(last.close, last.timestamp))
    }

    pub fn analyze_price(&self, price: f64, when: DateTime<Utc>) -> ValuationSnapshot {
        let fair_value = self.fair_value_at(when);
        let log_fair = fair_value.log10();
        let support_value = 10f64.powf(log_fair - self.corridor_offset);
        let resistance_value = 10f64.powf(log_fair + self.corridor_offset);

        let status = if price < support_value {
            CorridorStatus::DeepValue
        } else if price > resistance_value {
            CorridorStatus::BubbleRisk
        } else {
            CorridorStatus::FairValueZone
        };

        // Past the halfway mark toward a band, mean reversion becomes the
        // base case over the medium term.
        let log_distance = price.log10() - log_fair;
        let mean_reversion_narrative = if log_distance.abs() > self.corridor_offset * 0.5 {
            let direction = if log_distance > 0.0 { "down" } else { "up" };
            Some(format!(
                "The current price is significantly deviated from the long-term fair value line. \
                 A reversion to the mean ({}wards) is probable over the medium term (6-12 months).",
                direction
            ))
        } else {
            None
        };

        ValuationSnapshot {
            status,
            fair_value,
            support_value,
            resistance_value,
            mean_reversion_narrative,
        }
    }
}
