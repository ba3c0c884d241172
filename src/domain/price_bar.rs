//! Daily price bar representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of open/high/low/close/volume data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// low <= open, close <= high
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// Lowest `low` across the series, `None` when empty.
pub fn lowest_low(bars: &[PriceBar]) -> Option<f64> {
    bars.iter().map(|b| b.low).reduce(f64::min)
}

/// Highest `high` across the series, `None` when empty.
pub fn highest_high(bars: &[PriceBar]) -> Option<f64> {
    bars.iter().map(|b| b.high).reduce(f64::max)
}
