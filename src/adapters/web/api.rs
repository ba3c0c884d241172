//! JSON endpoints mirroring the HTML views.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::dashboard::StockDetail;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::StockQuote;

use super::{AppState, WebError};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}

pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StockQuote>>, WebError> {
    Ok(Json(state.dashboard.stock_list().await?))
}

pub async fn stock_detail(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<StockDetail>, WebError> {
    Ok(Json(state.dashboard.stock_detail(&symbol).await?))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<PriceBar>>, WebError> {
    let days = query.days.unwrap_or(state.dashboard.history_days());
    Ok(Json(state.dashboard.history(&symbol, days).await?))
}
