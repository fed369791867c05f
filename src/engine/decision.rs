//! Decision mapper: deterministic thresholds over the composite score.

use crate::models::recommendation::Advice;

/// Map a composite score to a recommendation and confidence. Boundaries
/// are inclusive toward the stronger category.
pub fn map_score(score: f64) -> (Advice, f64) {
    let abs_score = score.abs();
    if score >= 0.7 {
        (Advice::StrongBuy, abs_score.min(1.0))
    } else if score >= 0.3 {
        (Advice::Buy, abs_score)
    } else if score <= -0.7 {
        (Advice::StrongSell, abs_score.min(1.0))
    } else if score <= -0.3 {
        (Advice::Sell, abs_score)
    } else {
        (Advice::Hold, 1.0 - abs_score)
    }
}
