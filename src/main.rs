//! Coinsage CLI
//!
//! One-shot advisor run: fetch data, analyze, print the recommendation
//! report. Set USE_MOCK_DATA=1 to run offline.

use coinsage::config;
use coinsage::core::http::build_service;
use coinsage::engine::format;
use coinsage::logging;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!(environment = %env, "Starting Coinsage advisor");

    let service = build_service();
    let recommendation = service.recommend(config::history_days(), 7, 50).await?;

    println!("{}", format::render_text(&recommendation));

    Ok(())
}
