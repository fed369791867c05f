//! Factor scorers: one per signal family, each mapping adapter output to a
//! bounded score in [-1, 1] plus a rationale.

use crate::models::recommendation::{FactorScore, SignalBundle};
use crate::models::sentiment::{SentimentSnapshot, SourceAdvice};
use crate::models::technical::{MaTrend, TechnicalSnapshot};
use crate::models::valuation::{CorridorStatus, ValuationSnapshot};

use super::gate::{EUPHORIA_LEVEL, FEAR_LEVEL};

/// Score the RSI oscillator. Graded zones, not a single step at 70/30:
/// the score deepens toward ±1 as the reading approaches the extremes.
pub fn score_rsi(value: f64) -> FactorScore {
    if value >= 70.0 {
        let score = -0.5 - 0.5 * ((value - 70.0) / 30.0).min(1.0);
        FactorScore::new(score, format!("RSI overbought at {:.1}", value))
    } else if value <= 30.0 {
        let score = 0.5 + 0.5 * ((30.0 - value) / 30.0).min(1.0);
        FactorScore::new(score, format!("RSI oversold at {:.1}", value))
    } else if (40.0..=60.0).contains(&value) {
        FactorScore::new(0.0, format!("RSI neutral at {:.1}", value))
    } else if value > 60.0 {
        FactorScore::new(-0.3, format!("RSI leaning overbought at {:.1}", value))
    } else {
        FactorScore::new(0.3, format!("RSI leaning oversold at {:.1}", value))
    }
}

/// Score the moving-average structure. Additive model over trend state,
/// crossovers and the long-horizon support band, clamped to [-1, 1].
/// A missing long-horizon EMA skips the band contribution (insufficient
/// history, not an error).
pub fn score_moving_averages(technical: &TechnicalSnapshot, price: f64) -> FactorScore {
    let mut sum: f64 = 0.0;
    let mut triggers: Vec<String> = Vec::new();

    match technical.ma_trend {
        MaTrend::StrongBullish => {
            sum += 0.8;
            triggers.push("strong bullish trend".to_string());
        }
        MaTrend::Bullish => {
            sum += 0.5;
            triggers.push("bullish trend".to_string());
        }
        MaTrend::Bearish => {
            sum -= 0.5;
            triggers.push("bearish trend".to_string());
        }
        MaTrend::StrongBearish => {
            sum -= 0.8;
            triggers.push("strong bearish trend".to_string());
        }
        MaTrend::Neutral => {}
    }

    if technical.ma_crossovers.golden_cross {
        sum += 0.3;
        triggers.push("golden cross".to_string());
    }
    if technical.ma_crossovers.death_cross {
        sum -= 0.3;
        triggers.push("death cross".to_string());
    }

    if let Some(ema) = technical.long_horizon_ema() {
        if price > ema * 1.05 {
            sum += 0.2;
            triggers.push("above long-horizon support band".to_string());
        } else if price < ema * 0.95 {
            sum -= 0.2;
            triggers.push("long-horizon support lost".to_string());
        }
    }

    let label = if triggers.is_empty() {
        "Neutral MA structure".to_string()
    } else {
        triggers.join(", ")
    };

    FactorScore::new(sum.clamp(-1.0, 1.0), label)
}

/// Score the power-law valuation corridor. Band extremes are absolute
/// contrarian signals; inside the corridor the score grades by deviation,
/// with a slight positive bias near fair value reflecting the long-run
/// upward drift assumption.
pub fn score_power_law(valuation: &ValuationSnapshot, price: f64) -> FactorScore {
    let deviation = valuation.deviation_pct(price);
    let (score, zone) = match valuation.status {
        CorridorStatus::DeepValue => (1.0, "deep value"),
        CorridorStatus::BubbleRisk => (-1.0, "bubble risk"),
        CorridorStatus::FairValueZone => {
            if deviation < -20.0 {
                (0.6, "well below fair value")
            } else if deviation < -10.0 {
                (0.3, "below fair value")
            } else if deviation > 50.0 {
                (-0.7, "far above fair value")
            } else if deviation > 20.0 {
                (-0.4, "above fair value")
            } else {
                (0.1, "near fair value")
            }
        }
    };
    FactorScore::new(
        score,
        format!("Power law: {} ({:+.1}% vs fair value)", zone, deviation),
    )
}

/// Score the MACD state. The histogram normalizer is a price-regime
/// dependent constant supplied by the engine config.
pub fn score_macd(technical: &TechnicalSnapshot, histogram_scale: f64) -> FactorScore {
    let macd = &technical.macd;
    let magnitude = 0.4 * (macd.histogram.abs() / histogram_scale).min(1.0);
    if macd.signal.is_bullish() {
        FactorScore::new(
            0.3 + magnitude,
            format!("MACD bullish (histogram {:.1})", macd.histogram),
        )
    } else if macd.signal.is_bearish() {
        FactorScore::new(
            -0.3 - magnitude,
            format!("MACD bearish (histogram {:.1})", macd.histogram),
        )
    } else {
        FactorScore::new(0.0, "MACD neutral".to_string())
    }
}

/// Score combined social and news sentiment. One-sided extremes flip the
/// sign (contrarian read); otherwise the average compound grades the score.
/// The extreme checks here are independent of the top-level override gate;
/// both can fire on the same input.
pub fn score_sentiment(social: &SentimentSnapshot, news: &SentimentSnapshot) -> FactorScore {
    if social.euphoria_level() > EUPHORIA_LEVEL || news.euphoria_level() > EUPHORIA_LEVEL {
        return FactorScore::new(-0.6, "extreme euphoria (contrarian bearish)");
    }
    if social.euphoria_level() < FEAR_LEVEL || news.euphoria_level() < FEAR_LEVEL {
        return FactorScore::new(0.6, "extreme fear (contrarian bullish)");
    }

    let average = (social.average_compound + news.average_compound) / 2.0;
    let (score, mood) = if average > 0.6 {
        (0.4, "strongly positive")
    } else if average > 0.3 {
        (0.2, "positive")
    } else if average < -0.3 {
        (-0.4, "strongly negative")
    } else if average < -0.1 {
        (-0.2, "negative")
    } else {
        (0.0, "neutral")
    };
    FactorScore::new(
        score,
        format!("Sentiment {} (social {:.2}, news {:.2})", mood, social.average_compound, news.average_compound),
    )
}

/// Score all five factors into one bundle.
pub fn score_all(
    valuation: &ValuationSnapshot,
    technical: &TechnicalSnapshot,
    social: &SentimentSnapshot,
    news: &SentimentSnapshot,
    price: f64,
    histogram_scale: f64,
) -> SignalBundle {
    SignalBundle {
        rsi: score_rsi(technical.rsi.value),
        moving_averages: score_moving_averages(technical, price),
        power_law: score_power_law(valuation, price),
        macd: score_macd(technical, histogram_scale),
        sentiment: score_sentiment(social, news),
    }
}

/// Derive the legacy technical source vote: RSI and MACD each cast a
/// buy/sell/hold, majority wins, confidence is the winning share.
pub fn technical_source_advice(technical: &TechnicalSnapshot) -> (SourceAdvice, f64) {
    let rsi_vote = if technical.rsi.value > 70.0 {
        SourceAdvice::Sell
    } else if technical.rsi.value < 30.0 {
        SourceAdvice::Buy
    } else {
        SourceAdvice::Hold
    };
    let macd_vote = if technical.macd.signal.is_bullish() {
        SourceAdvice::Buy
    } else if technical.macd.signal.is_bearish() {
        SourceAdvice::Sell
    } else {
        SourceAdvice::Hold
    };

    let buy_votes = [rsi_vote, macd_vote]
        .iter()
        .filter(|v| **v == SourceAdvice::Buy)
        .count();
    let sell_votes = [rsi_vote, macd_vote]
        .iter()
        .filter(|v| **v == SourceAdvice::Sell)
        .count();

    if buy_votes > sell_votes {
        (SourceAdvice::Buy, buy_votes as f64 / 2.0)
    } else if sell_votes > buy_votes {
        (SourceAdvice::Sell, sell_votes as f64 / 2.0)
    } else {
        (SourceAdvice::Hold, 0.5)
    }
}
