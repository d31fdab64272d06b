//! Normalization functions for ledger input values.
//!
//! - **text**: diacritic stripping and header/month-name matching
//! - **datetime**: heterogeneous date parsing and output rendering
//! - **numeric**: amount parsing under the simple and locale dialects

pub mod datetime;
pub mod numeric;
pub mod text;

pub use datetime::{parse_date, render_date, render_iso_date};
pub use numeric::{InvalidAmount, format_amount, parse_amount};
pub use text::{match_key, month_from_name_es, strip_accents, strip_accents_opt};
