//! Web server adapter.
//!
//! Axum server with an HTMX frontend. The list and detail views re-request
//! themselves every poll interval; navigating replaces the polling element, so
//! the old view stops polling with it.

mod api;
mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use templates::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::dashboard::Dashboard;

pub struct AppState {
    pub dashboard: Dashboard,
    pub poll_interval: Duration,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::stock_list))
        .route("/stocks/{symbol}", get(handlers::stock_detail))
        .route("/api/stocks", get(api::list_quotes))
        .route("/api/stocks/{symbol}", get(api::stock_detail))
        .route("/api/stocks/{symbol}/history", get(api::history))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
