//! Application layer: settings, dashboard queries, polling and navigation.

pub mod dashboard;
pub mod navigator;
pub mod poller;
pub mod settings;
