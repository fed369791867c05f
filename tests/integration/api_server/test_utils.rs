//! Test utilities for API server integration tests

use axum_test::TestServer;
use coinsage::core::http::{create_router, AppState, HealthStatus};
use coinsage::metrics::Metrics;
use coinsage::services::{
    AdvisorService, MockNewsProvider, MockPriceProvider, MockSocialProvider,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Test helper for API server integration tests, wired to mock providers.
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let service = Arc::new(AdvisorService::new(
            Arc::new(MockPriceProvider::default()),
            Arc::new(MockNewsProvider),
            Arc::new(MockSocialProvider),
            Duration::from_secs(60),
        ));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            service,
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}
