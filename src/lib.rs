//! Coinsage: a Bitcoin trading advisor combining technical indicators,
//! power-law valuation and news/social sentiment into one explainable
//! recommendation.

pub mod analysis;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

pub use engine::{Advisor, EngineConfig, FactorWeights, LegacyWeights, WeightProfile};
pub use error::AdvisorError;
pub use models::recommendation::{Advice, Recommendation};
