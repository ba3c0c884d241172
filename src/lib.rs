//! stockdash: stock list and detail dashboard with simple technical analysis.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], view orchestration in [`app`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod app;
pub mod cli;
pub mod logging;
