//! CSV directory market data adapter.
//!
//! Layout: `<base>/quotes.csv` lists the stocks, `<base>/history/<SYMBOL>.csv`
//! holds daily bars for each symbol.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::error::DashError;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::{is_valid_symbol, StockQuote};
use crate::ports::market_data_port::MarketDataPort;

pub const QUOTES_FILE: &str = "quotes.csv";
pub const HISTORY_DIR: &str = "history";

#[derive(Debug, Deserialize)]
struct QuoteRow {
    symbol: String,
    name: String,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    market_cap: u64,
}

#[derive(Debug, Deserialize)]
struct BarRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Parses `date,open,high,low,close,volume` rows, sorted by date.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>, DashError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();

    for (line, result) in rdr.deserialize::<BarRow>().enumerate() {
        let row = result.map_err(|e| DashError::data_source(format!("CSV parse error: {}", e)))?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|e| {
            DashError::data_source(format!("invalid date '{}': {}", row.date, e))
        })?;
        let bar = PriceBar {
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if !bar.is_consistent() {
            tracing::warn!(row = line + 1, %date, "bar prices outside low/high range");
        }
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

fn read_quotes<R: Read>(reader: R) -> Result<Vec<StockQuote>, DashError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let now = Utc::now();
    rdr.deserialize::<QuoteRow>()
        .map(|result| {
            let row =
                result.map_err(|e| DashError::data_source(format!("CSV parse error: {}", e)))?;
            Ok(StockQuote {
                symbol: row.symbol.trim().to_string(),
                name: row.name,
                price: row.price,
                change: row.change,
                change_percent: row.change_percent,
                volume: row.volume,
                market_cap: row.market_cap,
                timestamp: now,
            })
        })
        .collect()
}

/// Bars dated within `days` days of the last bar, inclusive. A window
/// reaching past the earliest representable date keeps every bar.
pub fn trailing_window(bars: Vec<PriceBar>, days: u32) -> Vec<PriceBar> {
    let Some(last) = bars.last().map(|b| b.date) else {
        return bars;
    };
    match last.checked_sub_days(Days::new(days.into())) {
        Some(start) => bars.into_iter().filter(|b| b.date >= start).collect(),
        None => bars,
    }
}

pub struct CsvMarketData {
    base_path: PathBuf,
}

impl CsvMarketData {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn quotes_path(&self) -> PathBuf {
        self.base_path.join(QUOTES_FILE)
    }

    fn history_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(HISTORY_DIR).join(format!("{}.csv", symbol))
    }

    async fn read(path: &Path) -> Result<String, DashError> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            DashError::data_source(format!("failed to read {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl MarketDataPort for CsvMarketData {
    async fn list_quotes(&self) -> Result<Vec<StockQuote>, DashError> {
        let content = Self::read(&self.quotes_path()).await?;
        read_quotes(content.as_bytes())
    }

    async fn quote(&self, symbol: &str) -> Result<Option<StockQuote>, DashError> {
        let quotes = self.list_quotes().await?;
        Ok(quotes.into_iter().find(|q| q.symbol == symbol))
    }

    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError> {
        let unknown = || DashError::UnknownSymbol {
            symbol: symbol.to_string(),
        };
        // the symbol becomes a file name
        if !is_valid_symbol(symbol) {
            return Err(unknown());
        }
        let path = self.history_path(symbol);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => return Err(unknown()),
            Err(e) => {
                return Err(DashError::data_source(format!(
                    "cannot access {}: {}",
                    path.display(),
                    e
                )))
            }
        }
        let content = Self::read(&path).await?;
        let bars = read_bars(content.as_bytes())?;
        Ok(trailing_window(bars, days))
    }
}
