//! Dashboard settings resolved and validated from a [`ConfigPort`].
//!
//! Every key is optional; defaults reproduce the stock demo setup (mock data,
//! 30 second polling, 30 days of history).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::error::DashError;
use crate::ports::config_port::{ConfigPort, InvalidValue};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_POLL_INTERVAL_SECS: i64 = 30;
pub const DEFAULT_HISTORY_DAYS: i64 = 30;
pub const MAX_HISTORY_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq)]
pub struct MockSettings {
    pub seed: Option<u64>,
    pub list_latency: Duration,
    pub quote_latency: Duration,
    pub history_latency: Duration,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            seed: None,
            list_latency: Duration::from_millis(500),
            quote_latency: Duration::from_millis(300),
            history_latency: Duration::from_millis(400),
        }
    }
}

impl MockSettings {
    /// No simulated latency; used by tests and the one-shot commands.
    pub fn instant(seed: Option<u64>) -> Self {
        Self {
            seed,
            list_latency: Duration::ZERO,
            quote_latency: Duration::ZERO,
            history_latency: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSettings {
    Mock(MockSettings),
    Csv { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub listen: SocketAddr,
    pub poll_interval: Duration,
    pub history_days: u32,
    pub provider: ProviderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS as u64),
            history_days: DEFAULT_HISTORY_DAYS as u32,
            provider: ProviderSettings::Mock(MockSettings::default()),
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashError> {
        Ok(Self {
            listen: parse_listen(config)?,
            poll_interval: parse_poll_interval(config)?,
            history_days: parse_history_days(config)?,
            provider: parse_provider(config)?,
        })
    }
}

fn invalid(section: &str, key: &str, err: InvalidValue) -> DashError {
    DashError::config_invalid(section, key, err.to_string())
}

fn int_or(config: &dyn ConfigPort, section: &str, key: &str, default: i64) -> Result<i64, DashError> {
    Ok(config
        .get_int(section, key)
        .map_err(|e| invalid(section, key, e))?
        .unwrap_or(default))
}

fn bool_or(config: &dyn ConfigPort, section: &str, key: &str, default: bool) -> Result<bool, DashError> {
    Ok(config
        .get_bool(section, key)
        .map_err(|e| invalid(section, key, e))?
        .unwrap_or(default))
}

/// Accepts `1..=MAX_HISTORY_DAYS`; larger windows are refused before any
/// provider sizes a buffer from them.
pub fn validate_history_days(days: u32) -> Result<u32, DashError> {
    if days == 0 || i64::from(days) > MAX_HISTORY_DAYS {
        return Err(DashError::InvalidArgument {
            reason: format!("days must be between 1 and {}, got {}", MAX_HISTORY_DAYS, days),
        });
    }
    Ok(days)
}

fn parse_listen(config: &dyn ConfigPort) -> Result<SocketAddr, DashError> {
    let raw = config
        .get_string("server", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim().parse().map_err(|_| {
        DashError::config_invalid("server", "listen", format!("'{}' is not a socket address", raw))
    })
}

fn parse_poll_interval(config: &dyn ConfigPort) -> Result<Duration, DashError> {
    let secs = int_or(config, "dashboard", "poll_interval_secs", DEFAULT_POLL_INTERVAL_SECS)?;
    if secs < 1 {
        return Err(DashError::config_invalid(
            "dashboard",
            "poll_interval_secs",
            "poll_interval_secs must be at least 1",
        ));
    }
    Ok(Duration::from_secs(secs as u64))
}

fn parse_history_days(config: &dyn ConfigPort) -> Result<u32, DashError> {
    let days = int_or(config, "dashboard", "history_days", DEFAULT_HISTORY_DAYS)?;
    if !(1..=MAX_HISTORY_DAYS).contains(&days) {
        return Err(DashError::config_invalid(
            "dashboard",
            "history_days",
            format!("history_days must be between 1 and {}", MAX_HISTORY_DAYS),
        ));
    }
    Ok(days as u32)
}

fn parse_provider(config: &dyn ConfigPort) -> Result<ProviderSettings, DashError> {
    let kind = config
        .get_string("data", "provider")
        .unwrap_or_else(|| "mock".to_string());

    match kind.trim().to_lowercase().as_str() {
        "mock" => Ok(ProviderSettings::Mock(parse_mock(config)?)),
        "csv" => match config.get_string("data", "csv_path") {
            Some(path) if !path.trim().is_empty() => Ok(ProviderSettings::Csv {
                path: PathBuf::from(path.trim()),
            }),
            _ => Err(DashError::config_invalid(
                "data",
                "csv_path",
                "csv_path is required when provider = csv",
            )),
        },
        other => Err(DashError::config_invalid(
            "data",
            "provider",
            format!("unknown provider '{}', expected mock or csv", other),
        )),
    }
}

fn parse_mock(config: &dyn ConfigPort) -> Result<MockSettings, DashError> {
    let seed = match config.get_string("data", "seed") {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
            DashError::config_invalid("data", "seed", "seed must be a non-negative integer")
        })?),
        None => None,
    };

    if !bool_or(config, "data", "simulate_latency", true)? {
        return Ok(MockSettings::instant(seed));
    }

    let defaults = MockSettings::default();
    Ok(MockSettings {
        seed,
        list_latency: parse_latency(config, "list_latency_ms", defaults.list_latency)?,
        quote_latency: parse_latency(config, "quote_latency_ms", defaults.quote_latency)?,
        history_latency: parse_latency(config, "history_latency_ms", defaults.history_latency)?,
    })
}

fn parse_latency(config: &dyn ConfigPort, key: &str, default: Duration) -> Result<Duration, DashError> {
    let ms = int_or(config, "data", key, default.as_millis() as i64)?;
    if ms < 0 {
        return Err(DashError::config_invalid(
            "data",
            key,
            format!("{} must be non-negative", key),
        ));
    }
    Ok(Duration::from_millis(ms as u64))
}
