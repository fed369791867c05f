//! Shared data models spanning the advisor layers.

pub mod market;
pub mod recommendation;
pub mod sentiment;
pub mod technical;
pub mod valuation;

pub use market::{Candle, PriceHistory};
pub use recommendation::{
    Advice, FactorReason, FactorScore, Recommendation, SignalBundle, TargetSet,
};
pub use sentiment::{SentimentLabel, SentimentSnapshot, SourceAdvice};
pub use technical::{
    MaCrossovers, MacdReading, MacdSignal, MaTrend, MovingAverageEntry, PriceVsMa, RsiReading,
    TechnicalSnapshot, LONG_HORIZON_EMA,
};
pub use valuation::{CorridorStatus, ValuationSnapshot};
