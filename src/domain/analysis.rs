//! Price-history analysis: moving averages, volatility and trend.
//!
//! All functions are pure. Moving averages use the trailing window of the
//! series (most recent bars last) and return `0.0` when the series is shorter
//! than the window. Volatility is the population standard deviation of every
//! close in the series. Results are rounded to 2 decimals the way `{:.2}`
//! formatting rounds: on the exact binary value, ties to even. A stored
//! average therefore always prints as itself.

use serde::Serialize;

use crate::domain::error::DashError;
use crate::domain::price_bar::PriceBar;

pub const SHORT_PERIOD: usize = 5;
pub const MEDIUM_PERIOD: usize = 20;
pub const LONG_PERIOD: usize = 50;

/// Value returned for a moving average whose window exceeds the series.
pub const INSUFFICIENT_DATA: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl Trend {
    /// Strict ordering of the three averages; any tie or mixed order is sideways.
    pub fn classify(short: f64, medium: f64, long: f64) -> Self {
        if short > medium && medium > long {
            Trend::Up
        } else if short < medium && medium < long {
            Trend::Down
        } else {
            Trend::Sideways
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Sideways => "sideways",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Up => "📈",
            Trend::Down => "📉",
            Trend::Sideways => "📊",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "上昇トレンド",
            Trend::Down => "下落トレンド",
            Trend::Sideways => "横ばいトレンド",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub moving_average_5: f64,
    pub moving_average_20: f64,
    pub moving_average_50: f64,
    pub volatility: f64,
    pub trend: Trend,
}

pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

pub fn compute_moving_average(series: &[PriceBar], period: usize) -> f64 {
    if period == 0 || series.len() < period {
        return INSUFFICIENT_DATA;
    }
    let window = &series[series.len() - period..];
    let sum: f64 = window.iter().map(|b| b.close).sum();
    round2(sum / period as f64)
}

fn population_stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

pub fn compute_analysis(series: &[PriceBar]) -> Result<AnalysisSummary, DashError> {
    if series.is_empty() {
        return Err(DashError::InvalidArgument {
            reason: "cannot analyse an empty price series".into(),
        });
    }

    let ma5 = compute_moving_average(series, SHORT_PERIOD);
    let ma20 = compute_moving_average(series, MEDIUM_PERIOD);
    let ma50 = compute_moving_average(series, LONG_PERIOD);

    let closes: Vec<f64> = series.iter().map(|b| b.close).collect();
    let volatility = round2(population_stddev(&closes));

    Ok(AnalysisSummary {
        moving_average_5: ma5,
        moving_average_20: ma20,
        moving_average_50: ma50,
        volatility,
        trend: Trend::classify(ma5, ma20, ma50),
    })
}
