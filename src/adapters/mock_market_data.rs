//! Random market data generator for demos and tests.
//!
//! Quotes jitter around a fixed catalog of base figures; history is a noisy
//! walk around the base price with one bar per calendar day ending at the
//! anchor date. Each call sleeps for the configured latency before answering.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

use crate::app::settings::{MockSettings, MAX_HISTORY_DAYS};
use crate::domain::analysis::round2;
use crate::domain::error::DashError;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::StockQuote;
use crate::ports::market_data_port::MarketDataPort;

/// Base price used for history of a symbol missing from the catalog.
pub const FALLBACK_BASE_PRICE: f64 = 100.0;

const HISTORY_VOLATILITY: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct ListedStock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: u64,
}

impl ListedStock {
    fn new(
        symbol: &str,
        name: &str,
        price: f64,
        change: f64,
        change_percent: f64,
        volume: u64,
        market_cap: u64,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change,
            change_percent,
            volume,
            market_cap,
        }
    }
}

pub fn default_catalog() -> Vec<ListedStock> {
    vec![
        ListedStock::new("AAPL", "Apple Inc.", 175.84, 2.45, 1.41, 45_234_567, 2_800_000_000_000),
        ListedStock::new("GOOGL", "Alphabet Inc.", 142.56, -1.23, -0.85, 23_456_789, 1_800_000_000_000),
        ListedStock::new("MSFT", "Microsoft Corporation", 378.85, 4.12, 1.10, 34_567_890, 2_900_000_000_000),
        ListedStock::new("TSLA", "Tesla Inc.", 248.42, -8.76, -3.41, 78_901_234, 790_000_000_000),
    ]
}

pub struct MockMarketData {
    catalog: Vec<ListedStock>,
    settings: MockSettings,
    anchor: Option<NaiveDate>,
    rng: Mutex<StdRng>,
}

impl MockMarketData {
    pub fn new(settings: MockSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog: default_catalog(),
            settings,
            anchor: None,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<ListedStock>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Pins the last history date instead of using today's local date.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn anchor_date(&self) -> NaiveDate {
        self.anchor.unwrap_or_else(|| Local::now().date_naive())
    }

    fn find(&self, symbol: &str) -> Option<&ListedStock> {
        self.catalog.iter().find(|s| s.symbol == symbol)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, DashError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DashError::data_source("mock generator lock poisoned"))?;
        Ok(f(&mut rng))
    }

    fn jitter(stock: &ListedStock, rng: &mut StdRng) -> StockQuote {
        StockQuote {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            price: stock.price * (1.0 + (rng.gen_range(0.0..1.0) - 0.5) * 0.02),
            change: stock.change + (rng.gen_range(0.0..1.0) - 0.5) * 2.0,
            change_percent: stock.change_percent + (rng.gen_range(0.0..1.0) - 0.5),
            volume: stock.volume,
            market_cap: stock.market_cap,
            timestamp: Utc::now(),
        }
    }

    /// `days + 1` bars, one per calendar day, the last one on the anchor date.
    /// At most `MAX_HISTORY_DAYS` days.
    pub fn generate_history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError> {
        if i64::from(days) > MAX_HISTORY_DAYS {
            return Err(DashError::InvalidArgument {
                reason: format!("mock history is limited to {} days", MAX_HISTORY_DAYS),
            });
        }
        let base = self
            .find(symbol)
            .map(|s| s.price)
            .unwrap_or(FALLBACK_BASE_PRICE);
        let anchor = self.anchor_date();
        let start = anchor
            .checked_sub_days(Days::new(days.into()))
            .ok_or_else(|| DashError::InvalidArgument {
                reason: format!("{} days before {} is out of range", days, anchor),
            })?;

        self.with_rng(|rng| {
            start
                .iter_days()
                .take(days as usize + 1)
                .enumerate()
                .map(|(i, date)| {
                    let offset = days as usize - i;
                    let random_change = (rng.gen_range(0.0..1.0) - 0.5) * HISTORY_VOLATILITY * base;
                    let price = base + random_change * (1.0 + (offset as f64 * 0.1).sin());

                    let open = price * (1.0 + (rng.gen_range(0.0..1.0) - 0.5) * 0.01);
                    let close = price * (1.0 + (rng.gen_range(0.0..1.0) - 0.5) * 0.01);
                    let high = open.max(close) * (1.0 + rng.gen_range(0.0..1.0) * 0.02);
                    let low = open.min(close) * (1.0 - rng.gen_range(0.0..1.0) * 0.02);

                    PriceBar {
                        date,
                        open: round2(open),
                        high: round2(high),
                        low: round2(low),
                        close: round2(close),
                        volume: rng.gen_range(1_000_000..11_000_000),
                    }
                })
                .collect()
        })
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn list_quotes(&self) -> Result<Vec<StockQuote>, DashError> {
        simulate_latency(self.settings.list_latency).await;
        self.with_rng(|rng| {
            self.catalog
                .iter()
                .map(|stock| Self::jitter(stock, rng))
                .collect()
        })
    }

    async fn quote(&self, symbol: &str) -> Result<Option<StockQuote>, DashError> {
        simulate_latency(self.settings.quote_latency).await;
        match self.find(symbol) {
            Some(stock) => self.with_rng(|rng| Some(Self::jitter(stock, rng))),
            None => Ok(None),
        }
    }

    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError> {
        simulate_latency(self.settings.history_latency).await;
        let bars = self.generate_history(symbol, days)?;
        tracing::debug!(symbol, days, bars = bars.len(), "generated mock history");
        Ok(bars)
    }
}
