//! HTML templates using Askama.
//!
//! Views render to fragments; full page loads wrap the fragment in
//! [`BasePage`], HTMX requests receive the fragment alone.

use askama::Template;

use crate::adapters::chart_svg::generate_price_svg;
use crate::app::dashboard::StockDetail;
use crate::domain::analysis::AnalysisSummary;
use crate::domain::format::{
    format_change, format_change_percent, format_market_cap, format_moving_average, format_price,
    format_timestamp, format_volume,
};
use crate::domain::quote::StockQuote;

pub const FETCH_FAILED_MESSAGE: &str = "株価データの取得に失敗しました";
pub const NOT_FOUND_MESSAGE: &str = "株価データが見つかりませんでした";

/// Display-ready quote fields.
pub struct QuoteRow {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub change_class: &'static str,
    pub volume: String,
    pub market_cap: String,
}

impl QuoteRow {
    pub fn from_quote(quote: &StockQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            price: format_price(quote.price),
            change: format_change(quote.change),
            change_percent: format_change_percent(quote.change_percent),
            change_class: if quote.is_gain() { "positive" } else { "negative" },
            volume: format_volume(quote.volume),
            market_cap: format_market_cap(quote.market_cap),
        }
    }
}

pub struct AnalysisRow {
    pub ma5: String,
    pub ma20: String,
    pub ma50: String,
    pub volatility: String,
    pub trend: &'static str,
    pub trend_icon: &'static str,
    pub trend_label: &'static str,
}

impl AnalysisRow {
    pub fn from_summary(summary: &AnalysisSummary) -> Self {
        Self {
            ma5: format_moving_average(summary.moving_average_5),
            ma20: format_moving_average(summary.moving_average_20),
            ma50: format_moving_average(summary.moving_average_50),
            volatility: format!("{:.2}", summary.volatility),
            trend: summary.trend.as_str(),
            trend_icon: summary.trend.icon(),
            trend_label: summary.trend.label(),
        }
    }
}

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "stock_list.html")]
pub struct StockListTemplate<'a> {
    pub rows: &'a [QuoteRow],
    pub error: Option<&'a str>,
    pub poll_secs: u64,
}

#[derive(Template)]
#[template(path = "stock_detail.html")]
pub struct StockDetailTemplate<'a> {
    pub row: QuoteRow,
    pub updated: String,
    pub has_history: bool,
    pub history_days: u32,
    pub chart_svg: &'a str,
    pub analysis: Option<AnalysisRow>,
    pub poll_secs: u64,
}

impl<'a> StockDetailTemplate<'a> {
    pub fn new(detail: &StockDetail, chart_svg: &'a str, history_days: u32, poll_secs: u64) -> Self {
        Self {
            row: QuoteRow::from_quote(&detail.quote),
            updated: format_timestamp(&detail.quote.timestamp),
            has_history: !detail.history.is_empty(),
            history_days,
            chart_svg,
            analysis: detail.analysis.as_ref().map(AnalysisRow::from_summary),
            poll_secs,
        }
    }
}

/// Detail view stand-in after a failed fetch. Keeps the polling attributes so
/// the next poll can restore the view.
#[derive(Template)]
#[template(path = "stock_detail_error.html")]
pub struct StockDetailErrorTemplate<'a> {
    pub symbol: &'a str,
    pub message: &'a str,
    pub poll_secs: u64,
}

/// Renders the chart for a detail view; kept separate so the SVG string
/// outlives the borrowing template.
pub fn detail_chart(detail: &StockDetail) -> String {
    generate_price_svg(&detail.history)
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

pub fn render_page(title: &str, fragment: &str) -> Result<String, askama::Error> {
    BasePage {
        title,
        content: fragment,
    }
    .render()
}
