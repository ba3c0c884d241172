//! List and detail queries backing every presentation surface.

use serde::Serialize;
use std::sync::Arc;

use crate::app::settings::validate_history_days;
use crate::domain::analysis::{compute_analysis, AnalysisSummary};
use crate::domain::error::DashError;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::{normalize_symbol, StockQuote};
use crate::ports::market_data_port::MarketDataPort;

#[derive(Debug, Clone, Serialize)]
pub struct StockDetail {
    pub quote: StockQuote,
    pub history: Vec<PriceBar>,
    /// `None` when the provider returned no history.
    pub analysis: Option<AnalysisSummary>,
}

#[derive(Clone)]
pub struct Dashboard {
    market_data: Arc<dyn MarketDataPort>,
    history_days: u32,
}

impl Dashboard {
    pub fn new(market_data: Arc<dyn MarketDataPort>, history_days: u32) -> Self {
        Self {
            market_data,
            history_days,
        }
    }

    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    pub async fn stock_list(&self) -> Result<Vec<StockQuote>, DashError> {
        let quotes = self.market_data.list_quotes().await?;
        tracing::debug!(count = quotes.len(), "fetched stock list");
        Ok(quotes)
    }

    pub async fn stock_detail(&self, symbol: &str) -> Result<StockDetail, DashError> {
        self.stock_detail_for(symbol, self.history_days).await
    }

    /// Bars for `symbol` over `days` days; `days` outside `1..=MAX_HISTORY_DAYS`
    /// is an `InvalidArgument`.
    pub async fn history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError> {
        let days = validate_history_days(days)?;
        self.market_data.history(&normalize_symbol(symbol), days).await
    }

    /// Quote and history are fetched concurrently; the analysis runs once both
    /// have arrived.
    pub async fn stock_detail_for(&self, symbol: &str, days: u32) -> Result<StockDetail, DashError> {
        let days = validate_history_days(days)?;
        let symbol = normalize_symbol(symbol);
        let (quote, history) = tokio::join!(
            self.market_data.quote(&symbol),
            self.market_data.history(&symbol, days)
        );

        let quote = quote?.ok_or_else(|| DashError::UnknownSymbol {
            symbol: symbol.clone(),
        })?;
        let history = history?;

        let analysis = if history.is_empty() {
            None
        } else {
            Some(compute_analysis(&history)?)
        };

        tracing::debug!(symbol = %symbol, bars = history.len(), "fetched stock detail");
        Ok(StockDetail {
            quote,
            history,
            analysis,
        })
    }
}
