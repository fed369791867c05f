//! I/O collaborators: data providers, caching and pipeline orchestration.

pub mod advisor;
pub mod cache;
pub mod market_data;
pub mod news;
pub mod social;

pub use advisor::AdvisorService;
pub use cache::TtlCache;
pub use market_data::{CoinGeckoProvider, MockPriceProvider, PriceProvider};
pub use news::{MockNewsProvider, NewsApiProvider, NewsProvider};
pub use social::{MockSocialProvider, RedditProvider, SocialProvider};
