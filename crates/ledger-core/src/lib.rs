#![deny(unsafe_code)]

//! Ledger generation engine.
//!
//! - **offsets**: balancing debit lines for credited production accounts
//! - **totals**: debit/credit sums and the balance check
//! - **pipeline**: one generation run from a decoded table to final lines

pub mod offsets;
pub mod pipeline;
pub mod totals;

pub use offsets::{generate_offsets, is_offset_eligible, offset_lines};
pub use pipeline::{RunOptions, RunReport, run};
pub use totals::{BALANCE_TOLERANCE, Totals, totals, within_tolerance};
