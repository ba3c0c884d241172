//! Concrete adapter implementations for ports and presentation surfaces.

pub mod chart_svg;
pub mod csv_market_data;
pub mod file_config_adapter;
pub mod mock_market_data;
pub mod terminal;
#[cfg(feature = "web")]
pub mod web;
