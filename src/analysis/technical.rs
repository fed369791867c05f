//! Technical analysis: RSI, MACD and the moving-average structure,
//! classified into the typed snapshot the engine consumes.

use crate::models::market::Candle;
use crate::models::technical::{
    MaCrossovers, MacdReading, MacdSignal, MaTrend, MovingAverageEntry, PriceVsMa, RsiReading,
    TechnicalSnapshot,
};
use std::collections::BTreeMap;

pub const MIN_CANDLES: usize = 50;

const RSI_PERIOD: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
const CROSS_LOOKBACK: usize = 5;

const SMA_PERIODS: [usize; 3] = [20, 50, 200];
const EMA_PERIODS: [usize; 3] = [12, 26, 147];

/// Run the full technical analysis over daily candles, oldest first.
/// Returns `None` when there is not enough history for the core
/// indicators; long-window averages simply drop out individually.
pub fn analyze(candles: &[Candle]) -> Option<TechnicalSnapshot> {
    if candles.len() < MIN_CANDLES {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let price = *closes.last()?;

    let rsi = calculate_rsi(&closes, RSI_PERIOD)?;
    let macd = calculate_macd(&closes)?;
    let moving_averages = moving_average_entries(&closes, price);
    let ma_crossovers = detect_crossovers(&closes);
    let ma_trend = classify_trend(&closes, price);

    Some(TechnicalSnapshot {
        rsi: RsiReading { value: rsi },
        macd,
        ma_trend,
        ma_crossovers,
        moving_averages,
    })
}

/// RSI over the trailing window: average gain over average loss.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() < period + 1 {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in closes.len() - period..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// MACD 12/26/9 with crossover detection from the previous histogram sign.
pub fn calculate_macd(closes: &[f64]) -> Option<MacdReading> {
    if closes.len() < MACD_SLOW + MACD_SIGNAL {
        return None;
    }

    let fast = ema_series(closes, MACD_FAST);
    let slow = ema_series(closes, MACD_SLOW);
    let macd_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal_line = ema_series(&macd_line, MACD_SIGNAL);

    let last = macd_line.len() - 1;
    let macd_value = macd_line[last];
    let signal_value = signal_line[last];
    let histogram = macd_value - signal_value;
    let prev_histogram = if last > 0 {
        macd_line[last - 1] - signal_line[last - 1]
    } else {
        0.0
    };

    let signal = if macd_value > signal_value {
        if prev_histogram < 0.0 && histogram > 0.0 {
            MacdSignal::BullishCrossover
        } else {
            MacdSignal::Bullish
        }
    } else if macd_value < signal_value {
        if prev_histogram > 0.0 && histogram < 0.0 {
            MacdSignal::BearishCrossover
        } else {
            MacdSignal::Bearish
        }
    } else {
        MacdSignal::Neutral
    };

    Some(MacdReading {
        macd_line: macd_value,
        signal_line: signal_value,
        histogram,
        signal,
    })
}

/// Full EMA series with the standard 2/(n+1) smoothing, seeded from the
/// first value.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = match values.first() {
        Some(v) => *v,
        None => return out,
    };
    for value in values {
        ema = value * alpha + ema * (1.0 - alpha);
        out.push(ema);
    }
    out
}

/// Trailing SMA ending at `end` (exclusive), if the window fits.
pub fn sma_at(values: &[f64], period: usize, end: usize) -> Option<f64> {
    if end < period || end > values.len() {
        return None;
    }
    Some(values[end - period..end].iter().sum::<f64>() / period as f64)
}

fn moving_average_entries(closes: &[f64], price: f64) -> BTreeMap<String, MovingAverageEntry> {
    let mut entries = BTreeMap::new();
    let end = closes.len();

    for period in SMA_PERIODS {
        if let Some(value) = sma_at(closes, period, end) {
            entries.insert(format!("sma_{}", period), entry_for(price, value));
        }
    }
    for period in EMA_PERIODS {
        if closes.len() >= period {
            if let Some(value) = ema_series(closes, period).last().copied() {
                entries.insert(format!("ema_{}", period), entry_for(price, value));
            }
        }
    }
    entries
}

fn entry_for(price: f64, value: f64) -> MovingAverageEntry {
    MovingAverageEntry {
        value,
        price_vs_ma: if price >= value {
            PriceVsMa::Above
        } else {
            PriceVsMa::Below
        },
        distance_pct: (price - value) / value * 100.0,
    }
}

/// Golden/death cross: SMA-50 crossing SMA-200 within the lookback.
/// Short-term cross: EMA-12 vs EMA-26 the same way.
fn detect_crossovers(closes: &[f64]) -> MaCrossovers {
    let end = closes.len();
    let mut crossovers = MaCrossovers::default();

    if end > CROSS_LOOKBACK {
        let before = end - CROSS_LOOKBACK;
        if let (Some(fast_now), Some(slow_now), Some(fast_then), Some(slow_then)) = (
            sma_at(closes, 50, end),
            sma_at(closes, 200, end),
            sma_at(closes, 50, before),
            sma_at(closes, 200, before),
        ) {
            crossovers.golden_cross = fast_now > slow_now && fast_then <= slow_then;
            crossovers.death_cross = fast_now < slow_now && fast_then >= slow_then;
        }

        let ema_fast = ema_series(closes, 12);
        let ema_slow = ema_series(closes, 26);
        if end > CROSS_LOOKBACK && ema_fast.len() == end {
            let (fast_now, slow_now) = (ema_fast[end - 1], ema_slow[end - 1]);
            let (fast_then, slow_then) = (ema_fast[before - 1], ema_slow[before - 1]);
            crossovers.short_term_bullish_cross = fast_now > slow_now && fast_then <= slow_then;
            crossovers.short_term_bearish_cross = fast_now < slow_now && fast_then >= slow_then;
        }
    }

    crossovers
}

/// Trend state from the price/SMA stack. With fewer than 200 candles the
/// classification falls back to the short stack and never reports a
/// strong trend.
fn classify_trend(closes: &[f64], price: f64) -> MaTrend {
    let end = closes.len();
    let sma20 = sma_at(closes, 20, end);
    let sma50 = sma_at(closes, 50, end);
    let sma200 = sma_at(closes, 200, end);

    match (sma20, sma50, sma200) {
        (Some(s20), Some(s50), Some(s200)) => {
            if price > s20 && s20 > s50 && s50 > s200 {
                MaTrend::StrongBullish
            } else if price > s50 && s50 > s200 {
                MaTrend::Bullish
            } else if price < s20 && s20 < s50 && s50 < s200 {
                MaTrend::StrongBearish
            } else if price < s50 && s50 < s200 {
                MaTrend::Bearish
            } else {
                MaTrend::Neutral
            }
        }
        (Some(s20), Some(s50), None) => {
            if price > s20 && s20 > s50 {
                MaTrend::Bullish
            } else if price < s20 && s20 < s50 {
                MaTrend::Bearish
            } else {
                MaTrend::Neutral
            }
        }
        _ => MaTrend::Neutral,
    }
}
