//! CLI library components for the ledger entry generator.

pub mod config;
pub mod generate;
pub mod logging;
