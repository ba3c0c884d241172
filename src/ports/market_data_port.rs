//! Market data access port trait.

use async_trait::async_trait;

use crate::domain::error::DashError;
use crate::domain::price_bar::PriceBar;
use crate::domain::quote::StockQuote;

#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Current snapshot of every listed stock, in listing order.
    async fn list_quotes(&self) -> Result<Vec<StockQuote>, DashError>;

    /// `Ok(None)` when the symbol is not listed.
    async fn quote(&self, symbol: &str) -> Result<Option<StockQuote>, DashError>;

    /// Daily bars from `days` days before the anchor date through the anchor
    /// date, oldest first.
    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, DashError>;
}
