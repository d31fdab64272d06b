//! Ledger data transformation utilities.
//!
//! - **normalization**: accent stripping, date parsing, and amount formatting
//! - **row**: turning one raw record into one canonical ledger line

pub mod normalization;
pub mod row;

pub use normalization::{
    InvalidAmount, format_amount, match_key, month_from_name_es, parse_amount, parse_date,
    render_date, render_iso_date, strip_accents, strip_accents_opt,
};
pub use row::{
    AmountWarning, NormalizedBatch, NormalizedRow, normalize_row, normalize_rows,
    provision_note, provision_reference,
};
