//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config;
use crate::error::AdvisorError;
use crate::metrics::Metrics;
use crate::models::recommendation::Recommendation;
use crate::services::{
    AdvisorService, CoinGeckoProvider, MockNewsProvider, MockPriceProvider, MockSocialProvider,
    NewsApiProvider, RedditProvider,
};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<AdvisorService>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "coinsage-advisor"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn status_for(error: &AdvisorError) -> StatusCode {
    match error {
        AdvisorError::InsufficientHistory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AdvisorError::OutOfRange { .. } | AdvisorError::InvalidWeights(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AdvisorError::MarketData(_) | AdvisorError::News(_) | AdvisorError::Social(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationRequest {
    #[serde(default = "default_days")]
    days: usize,
    #[serde(default = "default_news_days")]
    news_days: usize,
    #[serde(default = "default_max_articles")]
    max_articles: usize,
}

fn default_days() -> usize {
    365
}

fn default_news_days() -> usize {
    7
}

fn default_max_articles() -> usize {
    50
}

#[derive(Debug, Deserialize)]
struct TechnicalQuery {
    #[serde(default = "default_days")]
    days: usize,
}

#[derive(Debug, Deserialize)]
struct SentimentQuery {
    #[serde(default = "default_news_days")]
    days: usize,
    #[serde(default = "default_max_articles")]
    max_articles: usize,
}

#[derive(Debug, Serialize)]
struct PriceResponse {
    price: f64,
    currency: &'static str,
    symbol: &'static str,
}

async fn get_price(State(state): State<AppState>) -> Result<Json<PriceResponse>, StatusCode> {
    let price = state.service.current_price().await.map_err(|e| {
        error!(error = %e, "Failed to fetch current price");
        status_for(&e)
    })?;
    Ok(Json(PriceResponse {
        price,
        currency: "USD",
        symbol: "BTC",
    }))
}

async fn get_recommendation(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<Recommendation>, StatusCode> {
    let start = Instant::now();
    let recommendation = state
        .service
        .recommend(request.days, request.news_days, request.max_articles)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to generate recommendation");
            status_for(&e)
        })?;

    state.metrics.evaluations_total.inc();
    state
        .metrics
        .evaluation_duration_seconds
        .observe(start.elapsed().as_secs_f64());

    info!(
        recommendation = recommendation.recommendation.as_str(),
        confidence = recommendation.confidence,
        "recommendation served"
    );
    Ok(Json(recommendation))
}

async fn get_technical(
    State(state): State<AppState>,
    Query(params): Query<TechnicalQuery>,
) -> Result<Json<Value>, StatusCode> {
    let price = state.service.current_price().await.map_err(|e| {
        error!(error = %e, "Failed to fetch current price");
        status_for(&e)
    })?;
    let (snapshot, _) = state
        .service
        .technical_snapshot(params.days)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to run technical analysis");
            status_for(&e)
        })?;

    Ok(Json(json!({
        "current_price": price,
        "technical_analysis": snapshot
    })))
}

async fn get_sentiment(
    State(state): State<AppState>,
    Query(params): Query<SentimentQuery>,
) -> Result<Json<Value>, StatusCode> {
    let news = state
        .service
        .news_sentiment(params.days, params.max_articles)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to run news sentiment analysis");
            status_for(&e)
        })?;
    let social = state
        .service
        .social_sentiment(params.max_articles)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to run social sentiment analysis");
            status_for(&e)
        })?;

    Ok(Json(json!({
        "news": news,
        "social": social
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/price", get(get_price))
        .route("/api/recommendation", post(get_recommendation))
        .route("/api/technical", get(get_technical))
        .route("/api/sentiment", get(get_sentiment))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the advisor service from the environment: live providers by
/// default, mocks when USE_MOCK_DATA is set, and a mock news feed when no
/// API key is configured.
pub fn build_service() -> Arc<AdvisorService> {
    let ttl = config::price_cache_ttl();

    if config::use_mock_data() {
        info!("Using mock data providers");
        return Arc::new(AdvisorService::new(
            Arc::new(MockPriceProvider::default()),
            Arc::new(MockNewsProvider),
            Arc::new(MockSocialProvider),
            ttl,
        ));
    }

    let news: Arc<dyn crate::services::NewsProvider> = match config::newsapi_key() {
        Some(key) => Arc::new(NewsApiProvider::new(key)),
        None => {
            info!("No NewsAPI key configured, falling back to mock news");
            Arc::new(MockNewsProvider)
        }
    };

    Arc::new(AdvisorService::new(
        Arc::new(CoinGeckoProvider::new()),
        news,
        Arc::new(RedditProvider::new(config::subreddit())),
        ttl,
    ))
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());
    let service = build_service();

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        service,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
