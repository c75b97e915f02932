pub mod artifacts;
pub mod cli;
pub mod config;
pub mod eth;
pub mod inspector;
pub mod models;
pub mod networks;
pub mod report;
pub mod units;
