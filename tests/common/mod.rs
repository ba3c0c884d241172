#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use stockdash::app::dashboard::Dashboard;
use stockdash::domain::error::DashError;
pub use stockdash::domain::price_bar::PriceBar;
pub use stockdash::domain::quote::StockQuote;
use stockdash::ports::market_data_port::MarketDataPort;

/// Fixed data keyed by symbol. Errors take precedence over data.
pub struct StaticMarketData {
    pub quotes: Vec<StockQuote>,
    pub history: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
    pub list_error: Option<String>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self {
            quotes: Vec::new(),
            history: HashMap::new(),
            errors: HashMap::new(),
            list_error: None,
        }
    }

    pub fn with_quote(mut self, quote: StockQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    pub fn with_history(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.history.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn with_list_error(mut self, reason: &str) -> Self {
        self.list_error = Some(reason.to_string());
        self
    }

    pub fn into_dashboard(self, history_days: u32) -> Dashboard {
        Dashboard::new(Arc::new(self), history_days)
    }
}

#[async_trait]
impl MarketDataPort for StaticMarketData {
    async fn list_quotes(&self) -> Result<Vec<StockQuote>, DashError> {
        if let Some(reason) = &self.list_error {
            return Err(DashError::data_source(reason.clone()));
        }
        Ok(self.quotes.clone())
    }

    async fn quote(&self, symbol: &str) -> Result<Option<StockQuote>, DashError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DashError::data_source(reason.clone()));
        }
        Ok(self.quotes.iter().find(|q| q.symbol == symbol).cloned())
    }

    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DashError::data_source(reason.clone()));
        }
        let bars = self.history.get(symbol).cloned().unwrap_or_default();
        let keep = (days as usize + 1).min(bars.len());
        Ok(bars[bars.len() - keep..].to_vec())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(date: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        date,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000_000,
    }
}

/// One bar per day starting at 2024-01-01.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(start + Duration::days(i as i64), close))
        .collect()
}

pub fn generate_bars(count: usize, start_price: f64, step: f64) -> Vec<PriceBar> {
    let closes: Vec<f64> = (0..count).map(|i| start_price + step * i as f64).collect();
    bars_from_closes(&closes)
}

pub fn make_quote(symbol: &str, price: f64, change: f64) -> StockQuote {
    StockQuote {
        symbol: symbol.to_string(),
        name: format!("{symbol} Corp."),
        price,
        change,
        change_percent: change / (price - change) * 100.0,
        volume: 12_345_678,
        market_cap: 1_500_000_000_000,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    }
}
