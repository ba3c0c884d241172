//! HTML view handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::error::public_message;
use super::templates::{
    detail_chart, render_page, QuoteRow, StockDetailErrorTemplate, StockDetailTemplate,
    StockListTemplate, FETCH_FAILED_MESSAGE,
};
use super::{is_htmx_request, AppState, WebError};
use crate::domain::quote::normalize_symbol;

fn respond(headers: &HeaderMap, title: &str, fragment: String) -> Result<Response, WebError> {
    if is_htmx_request(headers) {
        Ok(Html(fragment).into_response())
    } else {
        Ok(Html(render_page(title, &fragment)?).into_response())
    }
}

/// A failed fetch renders inside the polling container so the next poll can
/// replace it.
pub async fn stock_list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let poll_secs = state.poll_interval.as_secs();
    let fragment = match state.dashboard.stock_list().await {
        Ok(quotes) => {
            let rows: Vec<QuoteRow> = quotes.iter().map(QuoteRow::from_quote).collect();
            StockListTemplate {
                rows: &rows,
                error: None,
                poll_secs,
            }
            .render()?
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch stock list");
            StockListTemplate {
                rows: &[],
                error: Some(FETCH_FAILED_MESSAGE),
                poll_secs,
            }
            .render()?
        }
    };
    respond(&headers, "株価一覧", fragment)
}

/// HTMX polls ignore non-2xx responses, so a failed poll answers 200 with a
/// polling error container. Full page loads keep the error status.
pub async fn stock_detail(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let detail = match state.dashboard.stock_detail(&symbol).await {
        Ok(detail) => detail,
        Err(e) if is_htmx_request(&headers) => {
            let symbol = normalize_symbol(&symbol);
            let message = public_message(&e);
            let fragment = StockDetailErrorTemplate {
                symbol: &symbol,
                message: &message,
                poll_secs: state.poll_interval.as_secs(),
            }
            .render()?;
            return Ok(Html(fragment).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let chart_svg = detail_chart(&detail);
    let fragment = StockDetailTemplate::new(
        &detail,
        &chart_svg,
        state.dashboard.history_days(),
        state.poll_interval.as_secs(),
    )
    .render()?;
    respond(&headers, &detail.quote.symbol, fragment)
}

pub async fn not_found(headers: HeaderMap) -> WebError {
    WebError::not_found("ページが見つかりませんでした").as_fragment(is_htmx_request(&headers))
}
