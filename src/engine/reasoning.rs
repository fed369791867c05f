//! Reasoning composer: assembles per-factor rationales into one ordered
//! explanation, in prose and as structured records.

use crate::models::recommendation::{FactorReason, SignalBundle};
use crate::models::sentiment::SentimentSnapshot;
use crate::models::technical::TechnicalSnapshot;

/// Compose the holistic explanation. Fixed order: valuation/macro first,
/// then trend, then oscillators, then sentiment, then the divergence note
/// and an agreement summary.
pub fn compose(bundle: &SignalBundle, divergence: Option<&str>) -> (String, Vec<FactorReason>) {
    let mut sentences: Vec<String> = Vec::new();
    let mut records: Vec<FactorReason> = Vec::new();

    for (name, factor) in bundle.ordered() {
        sentences.push(factor.label.clone());
        records.push(FactorReason {
            factor: name.to_string(),
            score: factor.score,
            summary: factor.label.clone(),
        });
    }

    if let Some(note) = divergence {
        sentences.push(note.trim_end_matches('.').to_string());
    }

    sentences.push(agreement_note(bundle).to_string());

    (join_sentences(&sentences), records)
}

/// Compose the legacy three-source explanation in the shape of the
/// original source summaries.
pub fn compose_legacy(
    technical: &TechnicalSnapshot,
    social: &SentimentSnapshot,
    news: &SentimentSnapshot,
    technical_label: &str,
    divergence: Option<&str>,
) -> String {
    let mut sentences: Vec<String> = Vec::new();

    if let Some(note) = divergence {
        sentences.push(note.trim_end_matches('.').to_string());
    }
    sentences.push(format!(
        "Social sentiment is {} (score: {:.2})",
        social.overall_sentiment.as_str(),
        social.average_compound
    ));
    sentences.push(format!(
        "News sentiment is {} (score: {:.2})",
        news.overall_sentiment.as_str(),
        news.average_compound
    ));
    sentences.push(format!(
        "Technical analysis suggests a {} state (RSI {:.1})",
        technical_label, technical.rsi.value
    ));

    if social.recommendation == news.recommendation {
        sentences.push("Social sentiment and news sentiment are in agreement".to_string());
    } else {
        sentences.push(
            "There is some disagreement between signals, requiring a weighted approach"
                .to_string(),
        );
    }

    join_sentences(&sentences)
}

fn agreement_note(bundle: &SignalBundle) -> &'static str {
    let scores = bundle.scores();
    let bullish = scores.iter().filter(|s| **s > 0.05).count();
    let bearish = scores.iter().filter(|s| **s < -0.05).count();
    if bullish > 0 && bearish > 0 {
        "There is some disagreement between signals, requiring a weighted approach"
    } else {
        "All signal families point the same way"
    }
}

fn join_sentences(sentences: &[String]) -> String {
    let mut text = sentences
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(". ");
    text.push('.');
    text
}

/// Human label for the legacy technical vote, derived from its direction.
pub fn technical_state_label(direction: f64) -> &'static str {
    if direction > 0.0 {
        "buy"
    } else if direction < 0.0 {
        "sell"
    } else {
        "hold"
    }
}
