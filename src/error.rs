use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("market data error: {0}")]
    MarketData(String),

    #[error("news data error: {0}")]
    News(String),

    #[error("social data error: {0}")]
    Social(String),

    #[error("insufficient history: have {have} candles, need {need}")]
    InsufficientHistory { have: usize, need: usize },
}
