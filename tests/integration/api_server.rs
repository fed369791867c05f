//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and business logic.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::{json, Value};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "coinsage-advisor");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn price_endpoint_serves_the_mock_price() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/price").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["price"], 65_000.0);
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["symbol"], "BTC");
}

#[tokio::test]
async fn recommendation_endpoint_returns_a_full_result() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/recommendation")
        .json(&json!({ "days": 365, "news_days": 7, "max_articles": 20 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let advice = body["recommendation"].as_str().unwrap();
    assert!(
        ["strong_buy", "buy", "hold", "sell", "strong_sell", "contrarian_alert"]
            .contains(&advice)
    );

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));

    assert!(body["targets"].is_object());
    assert!(body["reasoning"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());

    if advice != "contrarian_alert" {
        let scores = &body["factor_scores"];
        for factor in ["rsi", "moving_averages", "power_law", "macd", "sentiment"] {
            let score = scores[factor]["score"].as_f64().unwrap();
            assert!((-1.0..=1.0).contains(&score), "unbounded {}", factor);
        }
        let composite = body["composite_score"].as_f64().unwrap();
        assert!((-1.0..=1.0).contains(&composite));

        let weights = &body["factor_weights"];
        let total: f64 = ["rsi", "moving_averages", "power_law", "macd", "sentiment"]
            .iter()
            .map(|f| weights[*f].as_f64().unwrap())
            .sum();
        assert!((total - 1.0).abs() < 0.011);
    }
}

#[tokio::test]
async fn recommendation_endpoint_applies_defaults() {
    let app = TestApiServer::new().await;
    let response = app.server.post("/api/recommendation").json(&json!({})).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn recommendation_rejects_insufficient_history() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/recommendation")
        .json(&json!({ "days": 10 }))
        .await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn technical_endpoint_reports_indicators() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/technical?days=365").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let rsi = body["technical_analysis"]["rsi"]["value"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&rsi));
    assert!(body["current_price"].as_f64().is_some());
    assert!(body["technical_analysis"]["macd"]["signal"].as_str().is_some());
}

#[tokio::test]
async fn sentiment_endpoint_reports_both_sources() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/sentiment").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    for source in ["news", "social"] {
        let compound = body[source]["average_compound"].as_f64().unwrap();
        assert!((-1.0..=1.0).contains(&compound));
        assert!(body[source]["article_count"].as_u64().is_some());
    }
}

#[tokio::test]
async fn metrics_count_evaluations() {
    let app = TestApiServer::new().await;
    let _ = app
        .server
        .post("/api/recommendation")
        .json(&json!({}))
        .await;

    let response = app.server.get("/metrics").await;
    let body = response.text();
    assert!(
        body.contains("evaluations_total"),
        "Expected evaluations_total metric"
    );
}
