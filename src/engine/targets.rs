//! Target calculator: illustrative price levels scaled by confidence.

use crate::models::recommendation::{Advice, TargetSet};

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive entry/target/stop levels (or a support/resistance band for hold
/// and alert outcomes) from the current price, recommendation and
/// confidence. Confidence scales the magnitude of the projected moves.
pub fn calculate_targets(price: f64, advice: Advice, confidence: f64) -> TargetSet {
    if advice.is_buy_family() {
        TargetSet::Directional {
            entry: round_cents(price),
            target_1: round_cents(price * (1.0 + 0.05 * confidence)),
            target_2: round_cents(price * (1.0 + 0.10 * confidence)),
            stop_loss: round_cents(price * (1.0 - 0.03 * confidence)),
        }
    } else if advice.is_sell_family() {
        TargetSet::Directional {
            entry: round_cents(price),
            target_1: round_cents(price * (1.0 - 0.05 * confidence)),
            target_2: round_cents(price * (1.0 - 0.10 * confidence)),
            stop_loss: round_cents(price * (1.0 + 0.03 * confidence)),
        }
    } else {
        // Hold and contrarian alerts both get a neutral +/-5% band.
        TargetSet::Neutral {
            entry: round_cents(price),
            support: round_cents(price * 0.95),
            resistance: round_cents(price * 1.05),
        }
    }
}
