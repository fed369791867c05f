//! Contrarian override gate and the informational divergence check.
//!
//! Extreme one-sided social sentiment marks a regime (euphoria or
//! capitulation) where the weighted blend is considered unreliable; the
//! gate replaces the normal pipeline output entirely rather than adding
//! another factor.

use crate::models::sentiment::SentimentSnapshot;

/// Thresholds on the [0, 1] euphoria level (0 = max fear, 1 = max euphoria).
pub const EUPHORIA_LEVEL: f64 = 0.85;
pub const FEAR_LEVEL: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrarianKind {
    Euphoria,
    Fear,
}

impl ContrarianKind {
    pub fn alert_type(&self) -> &'static str {
        match self {
            ContrarianKind::Euphoria => "Extreme Euphoria",
            ContrarianKind::Fear => "Extreme Fear",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ContrarianKind::Euphoria => {
                "CONTRARIAN ALERT: Market sentiment is unsustainably bullish. \
                 Historically, this precedes a pullback. Consider a cautious stance."
            }
            ContrarianKind::Fear => {
                "CONTRARIAN ALERT: Maximum fear detected. Potential local bottom. \
                 Historically, this is an accumulation zone."
            }
        }
    }
}

/// Check the raw social sentiment against the contrarian thresholds.
/// Fires before any blending; uses the raw compound, not the factor score.
pub fn check_contrarian(social: &SentimentSnapshot) -> Option<ContrarianKind> {
    let level = social.euphoria_level();
    if level > EUPHORIA_LEVEL {
        Some(ContrarianKind::Euphoria)
    } else if level < FEAR_LEVEL {
        Some(ContrarianKind::Fear)
    } else {
        None
    }
}

/// Minimum window for the price-vs-sentiment divergence check.
pub const DIVERGENCE_WINDOW: usize = 30;

/// Check for bearish divergence: price at its 30-day high while social
/// sentiment is not elevated. Informational only; the narrative is folded
/// into the reasoning and never changes the recommendation. Degrades to a
/// "not enough data" note on short history.
pub fn divergence_narrative(closes: &[f64], social: &SentimentSnapshot) -> String {
    if closes.len() < DIVERGENCE_WINDOW {
        return "Not enough data for divergence check.".to_string();
    }

    let recent = &closes[closes.len() - DIVERGENCE_WINDOW..];
    let max_close = recent.iter().cloned().fold(f64::MIN, f64::max);
    let current = recent[recent.len() - 1];

    if current >= max_close && social.euphoria_level() < 0.5 {
        "BEARISH DIVERGENCE: Price is hitting new highs, but social sentiment remains low. \
         This could signal underlying weakness."
            .to_string()
    } else {
        "No significant divergence detected.".to_string()
    }
}
