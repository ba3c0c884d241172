//! Display formatting shared by the web and terminal views.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::domain::analysis::INSUFFICIENT_DATA;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}", change)
    } else {
        format!("{:.2}", change)
    }
}

pub fn format_change_percent(change_percent: f64) -> String {
    if change_percent >= 0.0 {
        format!("+{:.2}%", change_percent)
    } else {
        format!("{:.2}%", change_percent)
    }
}

pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}

pub fn format_market_cap(market_cap: u64) -> String {
    if market_cap >= 1_000_000_000_000 {
        format!("{:.1}T", market_cap as f64 / 1_000_000_000_000.0)
    } else if market_cap >= 1_000_000_000 {
        format!("{:.1}B", market_cap as f64 / 1_000_000_000.0)
    } else {
        market_cap.to_string()
    }
}

/// Dollar amount, or N/A for the insufficient-data sentinel.
pub fn format_moving_average(value: f64) -> String {
    if value == INSUFFICIENT_DATA {
        NOT_AVAILABLE.to_string()
    } else {
        format!("${:.2}", value)
    }
}

/// Grouped thousands, e.g. `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `YYYY/M/D H:MM:SS` in the given zone.
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%Y/%-m/%-d %-H:%M:%S")
        .to_string()
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Short chart axis label, e.g. `1月5日`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m月%-d日").to_string()
}
