//! Current quote snapshot for a listed stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: u64,
    pub timestamp: DateTime<Utc>,
}

impl StockQuote {
    /// Zero counts as a gain, matching the list colouring.
    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }
}

/// Upper-cases and trims a user-supplied ticker.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

pub const MAX_SYMBOL_LEN: usize = 16;

/// True for normalized tickers: upper-case ASCII letters, digits, `.` and `-`,
/// starting with a letter or digit (`AAPL`, `BRK.B`, `7203`).
pub fn is_valid_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    symbol.len() <= MAX_SYMBOL_LEN
        && (first.is_ascii_uppercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}
