//! The recommendation engine: a pure, synchronous multi-factor scoring
//! model over already-fetched adapter snapshots.

pub mod composite;
pub mod decision;
pub mod factors;
pub mod format;
pub mod gate;
pub mod reasoning;
pub mod targets;
pub mod weights;

use crate::error::AdvisorError;
use crate::models::recommendation::{Advice, Recommendation};
use crate::models::sentiment::SentimentSnapshot;
use crate::models::technical::TechnicalSnapshot;
use crate::models::valuation::ValuationSnapshot;
use chrono::Utc;

pub use weights::{FactorWeights, LegacyWeights, WeightProfile};

/// Tunable constants of the engine. The MACD histogram normalizer is tied
/// to the price magnitude of the asset and must be recalibrated for very
/// different price regimes.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub macd_histogram_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            macd_histogram_scale: 1000.0,
        }
    }
}

/// The advisor engine. Holds the active weight profile and tuning
/// constants; everything else is request-scoped.
pub struct Advisor {
    profile: WeightProfile,
    config: EngineConfig,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(WeightProfile::default())
    }
}

impl Advisor {
    pub fn new(profile: WeightProfile) -> Self {
        Self {
            profile,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate one set of adapter snapshots into a recommendation.
    pub fn evaluate(
        &self,
        valuation: &ValuationSnapshot,
        technical: &TechnicalSnapshot,
        social: &SentimentSnapshot,
        news: &SentimentSnapshot,
        current_price: f64,
    ) -> Result<Recommendation, AdvisorError> {
        self.evaluate_inner(valuation, technical, social, news, current_price, None)
    }

    /// Evaluate with recent daily closes available, enabling the
    /// price-vs-sentiment divergence note.
    pub fn evaluate_with_history(
        &self,
        valuation: &ValuationSnapshot,
        technical: &TechnicalSnapshot,
        social: &SentimentSnapshot,
        news: &SentimentSnapshot,
        current_price: f64,
        closes: &[f64],
    ) -> Result<Recommendation, AdvisorError> {
        self.evaluate_inner(
            valuation,
            technical,
            social,
            news,
            current_price,
            Some(closes),
        )
    }

    fn evaluate_inner(
        &self,
        valuation: &ValuationSnapshot,
        technical: &TechnicalSnapshot,
        social: &SentimentSnapshot,
        news: &SentimentSnapshot,
        current_price: f64,
        closes: Option<&[f64]>,
    ) -> Result<Recommendation, AdvisorError> {
        validate_inputs(valuation, technical, social, news, current_price)?;

        // The gate runs before any blending and fully replaces the normal
        // pipeline output when it fires.
        if let Some(kind) = gate::check_contrarian(social) {
            return Ok(contrarian_alert(kind, current_price));
        }

        let divergence = closes.map(|c| gate::divergence_narrative(c, social));

        match self.profile {
            WeightProfile::Holistic(weights) => {
                let bundle = factors::score_all(
                    valuation,
                    technical,
                    social,
                    news,
                    current_price,
                    self.config.macd_histogram_scale,
                );
                let score = composite::composite_score(&bundle, &weights);
                let (advice, confidence) = decision::map_score(score);
                let targets = targets::calculate_targets(current_price, advice, confidence);
                let (reasoning, factor_reasons) =
                    reasoning::compose(&bundle, divergence.as_deref());

                Ok(Recommendation {
                    recommendation: advice,
                    confidence: round2(confidence),
                    composite_score: Some(round3(score)),
                    factor_scores: Some(bundle),
                    factor_weights: Some(weights),
                    alert_type: None,
                    targets,
                    reasoning,
                    factor_reasons,
                    current_price,
                    timestamp: Utc::now(),
                })
            }
            WeightProfile::Legacy(weights) => {
                let (technical_advice, technical_confidence) =
                    factors::technical_source_advice(technical);
                let score = composite::legacy_composite(
                    social,
                    news,
                    technical_advice.direction(),
                    technical_confidence,
                    &weights,
                );
                let (advice, confidence) = decision::map_score(score);
                let targets = targets::calculate_targets(current_price, advice, confidence);
                let reasoning = reasoning::compose_legacy(
                    technical,
                    social,
                    news,
                    reasoning::technical_state_label(technical_advice.direction()),
                    divergence.as_deref(),
                );

                Ok(Recommendation {
                    recommendation: advice,
                    confidence: round2(confidence),
                    composite_score: Some(round3(score)),
                    factor_scores: None,
                    factor_weights: None,
                    alert_type: None,
                    targets,
                    reasoning,
                    factor_reasons: Vec::new(),
                    current_price,
                    timestamp: Utc::now(),
                })
            }
        }
    }
}

fn contrarian_alert(kind: gate::ContrarianKind, current_price: f64) -> Recommendation {
    Recommendation {
        recommendation: Advice::ContrarianAlert,
        confidence: 1.0,
        composite_score: None,
        factor_scores: None,
        factor_weights: None,
        alert_type: Some(kind.alert_type().to_string()),
        targets: targets::calculate_targets(current_price, Advice::ContrarianAlert, 1.0),
        reasoning: kind.message().to_string(),
        factor_reasons: Vec::new(),
        current_price,
        timestamp: Utc::now(),
    }
}

fn validate_inputs(
    valuation: &ValuationSnapshot,
    technical: &TechnicalSnapshot,
    social: &SentimentSnapshot,
    news: &SentimentSnapshot,
    current_price: f64,
) -> Result<(), AdvisorError> {
    if !(current_price.is_finite() && current_price > 0.0) {
        return Err(AdvisorError::OutOfRange {
            field: "current_price",
            value: current_price,
            expected: "> 0",
        });
    }
    if !(valuation.fair_value.is_finite() && valuation.fair_value > 0.0) {
        return Err(AdvisorError::OutOfRange {
            field: "fair_value",
            value: valuation.fair_value,
            expected: "> 0",
        });
    }
    if !(0.0..=100.0).contains(&technical.rsi.value) {
        return Err(AdvisorError::OutOfRange {
            field: "rsi",
            value: technical.rsi.value,
            expected: "[0, 100]",
        });
    }
    for (field, snapshot) in [("social sentiment", social), ("news sentiment", news)] {
        if !(-1.0..=1.0).contains(&snapshot.average_compound) {
            return Err(AdvisorError::OutOfRange {
                field,
                value: snapshot.average_compound,
                expected: "[-1, 1]",
            });
        }
        if !(0.0..=1.0).contains(&snapshot.confidence) {
            return Err(AdvisorError::OutOfRange {
                field,
                value: snapshot.confidence,
                expected: "[0, 1]",
            });
        }
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
