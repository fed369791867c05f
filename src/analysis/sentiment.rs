//! Headline sentiment analysis and per-source aggregation.
//!
//! Headlines carry the strongest signal, so only title and description are
//! scored; full article bodies would dilute it.

use crate::models::sentiment::{SentimentLabel, SentimentSnapshot, SourceAdvice};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
}

const POSITIVE_WORDS: &[&str] = &[
    "surge", "surges", "soar", "soars", "rally", "rallies", "gain", "gains", "record", "high",
    "adoption", "bullish", "breakthrough", "growth", "institutional", "approval", "embrace",
    "milestone", "boom", "optimism", "upgrade", "accumulation", "strong", "wins",
];

const NEGATIVE_WORDS: &[&str] = &[
    "crash", "crashes", "plunge", "plunges", "fear", "ban", "bans", "drop", "drops", "fall",
    "falls", "bearish", "selloff", "sell-off", "uncertainty", "hack", "hacked", "fraud", "scam",
    "decline", "declines", "loss", "losses", "liquidation", "panic", "concern", "concerns",
    "crackdown", "weak",
];

/// Classification boundary on the compound score.
const CLASSIFY_EPSILON: f64 = 0.05;

pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity of one text in [-1, 1]. Lexicon hit count,
    /// squashed the way VADER normalizes its valence sum.
    pub fn analyze_text(&self, text: &str) -> f64 {
        let mut positive = 0i32;
        let mut negative = 0i32;

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '-')
        {
            if token.is_empty() {
                continue;
            }
            if POSITIVE_WORDS.contains(&token) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&token) {
                negative += 1;
            }
        }

        let net = (positive - negative) as f64;
        net / (net * net + 15.0).sqrt()
    }

    pub fn analyze_article(&self, article: &Article) -> f64 {
        let combined = format!("{} {}", article.title, article.description);
        self.analyze_text(&combined)
    }

    /// Aggregate a batch of articles into one source snapshot.
    pub fn analyze_articles(&self, articles: &[Article]) -> SentimentSnapshot {
        if articles.is_empty() {
            return SentimentSnapshot::neutral();
        }

        let compounds: Vec<f64> = articles.iter().map(|a| self.analyze_article(a)).collect();
        let average = compounds.iter().sum::<f64>() / compounds.len() as f64;

        let positive = compounds.iter().filter(|c| **c >= CLASSIFY_EPSILON).count();
        let negative = compounds.iter().filter(|c| **c <= -CLASSIFY_EPSILON).count();
        let neutral = compounds.len() - positive - negative;

        let (overall_sentiment, recommendation) = if average >= CLASSIFY_EPSILON {
            (SentimentLabel::Positive, SourceAdvice::Buy)
        } else if average <= -CLASSIFY_EPSILON {
            (SentimentLabel::Negative, SourceAdvice::Sell)
        } else {
            (SentimentLabel::Neutral, SourceAdvice::Hold)
        };

        // Consistency across articles and strength of the mean each carry
        // half the confidence.
        let dominant = positive.max(negative).max(neutral) as f64 / compounds.len() as f64;
        let confidence = dominant * 0.5 + average.abs() * 0.5;

        SentimentSnapshot {
            average_compound: round3(average),
            overall_sentiment,
            recommendation,
            confidence: round2(confidence),
            article_count: articles.len(),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
