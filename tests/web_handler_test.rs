#![cfg(feature = "web")]
//! Router-level tests for the HTML views and JSON endpoints.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use stockdash::adapters::csv_market_data::CsvMarketData;
use stockdash::app::dashboard::Dashboard;
use stockdash::adapters::web::{build_router, AppState, FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
use tower::ServiceExt;

use common::*;

fn test_market_data() -> StaticMarketData {
    StaticMarketData::new()
        .with_quote(make_quote("AAPL", 175.84, 2.45))
        .with_quote(make_quote("TSLA", 248.42, -5.67))
        .with_history("AAPL", generate_bars(60, 100.0, 1.0))
        .with_history("TSLA", Vec::new())
}

fn router_with(market_data: StaticMarketData) -> Router {
    build_router(AppState {
        dashboard: market_data.into_dashboard(60),
        poll_interval: Duration::from_secs(30),
    })
}

fn test_router() -> Router {
    router_with(test_market_data())
}

async fn get(router: Router, uri: &str, htmx: bool) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn list_page_renders_all_quotes() {
    let (status, body) = get(test_router(), "/", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<html"));
    assert!(body.contains("AAPL"));
    assert!(body.contains("TSLA"));
    assert!(body.contains("every 30s"));
    assert!(body.contains("change positive"));
    assert!(body.contains("change negative"));
}

#[tokio::test]
async fn htmx_list_request_gets_fragment() {
    let (status, body) = get(test_router(), "/", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<html"));
    assert!(body.contains("id=\"stock-list\""));
}

#[tokio::test]
async fn list_fetch_failure_keeps_polling_container() {
    let router = router_with(StaticMarketData::new().with_list_error("upstream down"));
    let (status, body) = get(router, "/", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(FETCH_FAILED_MESSAGE));
    assert!(body.contains("id=\"stock-list\""));
    assert!(!body.contains("upstream down"));
}

#[tokio::test]
async fn detail_page_shows_chart_and_analysis() {
    let (status, body) = get(test_router(), "/stocks/aapl", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"stock-detail\""));
    assert!(body.contains("<svg"));
    assert!(body.contains("テクニカル分析"));
    assert!(body.contains("$157.00"));
    assert!(body.contains("上昇トレンド"));
}

#[tokio::test]
async fn detail_without_history_omits_chart_and_analysis() {
    let (status, body) = get(test_router(), "/stocks/TSLA", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("TSLA"));
    assert!(!body.contains("<svg"));
    assert!(!body.contains("テクニカル分析"));
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let (status, body) = get(test_router(), "/stocks/ZZZZ", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn provider_failure_on_detail_page_is_bad_gateway() {
    let router = router_with(test_market_data().with_error("AAPL", "timeout"));
    let (status, body) = get(router, "/stocks/AAPL", false).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains(FETCH_FAILED_MESSAGE));
    assert!(!body.contains("timeout"));
}

#[tokio::test]
async fn failed_detail_poll_keeps_polling_container() {
    let router = router_with(test_market_data().with_error("AAPL", "timeout"));
    let (status, body) = get(router, "/stocks/AAPL", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"stock-detail\""));
    assert!(body.contains("every 30s"));
    assert!(body.contains(FETCH_FAILED_MESSAGE));
    assert!(!body.contains("timeout"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn unknown_symbol_poll_shows_not_found_message() {
    let (status, body) = get(test_router(), "/stocks/zzzz", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"stock-detail\""));
    assert!(body.contains(NOT_FOUND_MESSAGE));
    assert!(body.contains("ZZZZ"));
}

#[tokio::test]
async fn csv_history_refuses_encoded_path_segments() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("history")).unwrap();
    std::fs::write(
        dir.path().join("X.csv"),
        "date,open,high,low,close,volume\n2024-01-15,1,1,1,1,1\n",
    )
    .unwrap();
    let router = build_router(AppState {
        dashboard: Dashboard::new(Arc::new(CsvMarketData::new(dir.path().to_path_buf())), 30),
        poll_interval: Duration::from_secs(30),
    });

    let (status, body) = get(router, "/api/stocks/..%2FX/history", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("2024-01-15"));
}

#[tokio::test]
async fn api_list_returns_camel_case_json() {
    let (status, body) = get(test_router(), "/api/stocks", false).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let quotes = json.as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0]["symbol"], "AAPL");
    assert!(quotes[0].get("changePercent").is_some());
    assert!(quotes[0].get("marketCap").is_some());
}

#[tokio::test]
async fn api_detail_includes_analysis() {
    let (status, body) = get(test_router(), "/api/stocks/AAPL", false).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["quote"]["symbol"], "AAPL");
    assert_eq!(json["history"].as_array().unwrap().len(), 60);
    assert_eq!(json["analysis"]["movingAverage5"], 157.0);
    assert_eq!(json["analysis"]["trend"], "up");
}

#[tokio::test]
async fn api_history_honours_days() {
    let (status, body) = get(test_router(), "/api/stocks/AAPL/history?days=10", false).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn api_history_rejects_out_of_range_days() {
    let (status, _) = get(test_router(), "/api/stocks/AAPL/history?days=0", false).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(test_router(), "/api/stocks/AAPL/history?days=366", false).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(test_router(), "/api/stocks/AAPL/history?days=4000000000", false).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_route_falls_back_to_not_found() {
    let (status, body) = get(test_router(), "/nowhere", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("ページが見つかりませんでした"));
}
