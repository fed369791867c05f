//! Analysis adapters: they turn raw market and text data into the typed
//! snapshots the engine consumes.

pub mod power_law;
pub mod sentiment;
pub mod technical;

pub use power_law::PowerLawModel;
pub use sentiment::{Article, SentimentAnalyzer};
