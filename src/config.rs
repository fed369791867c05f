//! Environment-based configuration.

use std::env;
use std::time::Duration;

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

/// NewsAPI key, if configured. Placeholder values from a copied example
/// config are treated as absent.
pub fn newsapi_key() -> Option<String> {
    let key = env::var("NEWSAPI_KEY").ok()?;
    if key.is_empty() || key.starts_with("YOUR_") {
        return None;
    }
    Some(key)
}

pub fn price_cache_ttl() -> Duration {
    let seconds = env::var("PRICE_CACHE_TTL_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60);
    Duration::from_secs(seconds)
}

pub fn use_mock_data() -> bool {
    env::var("USE_MOCK_DATA")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn subreddit() -> String {
    env::var("SOCIAL_SUBREDDIT").unwrap_or_else(|_| "Bitcoin".to_string())
}

pub fn history_days() -> usize {
    env::var("HISTORY_DAYS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(365)
}
