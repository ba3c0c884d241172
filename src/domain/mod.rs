//! Core domain types and logic.

pub mod price_bar;
pub mod quote;
pub mod analysis;
pub mod format;
pub mod error;
