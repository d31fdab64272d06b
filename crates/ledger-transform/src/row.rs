//! Row normalization: one raw record in, one canonical ledger line out.

use tracing::{debug, warn};

use ledger_model::columns::{
    CREDIT_AMOUNT, DEBIT_AMOUNT, GL_ACCOUNT, GL_GROUP, GL_MONTH, GL_YEAR, JOB_NUMBER,
    TRANSACTION_DATE,
};
use ledger_model::{
    Amount, AmountPolicy, CanonicalLine, LedgerError, Month, NormalizeOptions, RawRecord, Result,
};

use crate::normalization::{parse_amount, parse_date, strip_accents};

/// An amount cell that was coerced to zero under [`AmountPolicy::Warn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountWarning {
    /// 1-based data row number (0 when normalizing a single record).
    pub row: usize,
    pub field: String,
    pub value: String,
}

/// A normalized line plus any amount cells that degraded to zero.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub line: CanonicalLine,
    pub warnings: Vec<AmountWarning>,
}

/// Lines normalized from a whole input, in input order.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub lines: Vec<CanonicalLine>,
    pub warnings: Vec<AmountWarning>,
}

/// Note text for a provision month, e.g. `Provision Marzo`.
pub fn provision_note(month: Month) -> String {
    strip_accents(&format!("Provisión {}", month.name_es()))
}

/// Reference text for a provision month, e.g. `Provision produccion Marzo 2024`.
///
/// A missing year leaves the trailing separator in place.
pub fn provision_reference(month: Month, year: Option<i32>) -> String {
    let year = year.map(|y| y.to_string()).unwrap_or_default();
    strip_accents(&format!("Provisión producción {} {year}", month.name_es()))
}

/// Normalizes one canonical-schema record.
///
/// Note and reference derive from month and year only.
///
/// # Errors
///
/// [`LedgerError::Validation`] when the account, job, month, or date column is
/// absent, the month is unusable, or the year is not numeric.
/// [`LedgerError::EmptyDate`] or [`LedgerError::DateFormat`] for a date cell
/// that is blank or unrecognized.
/// [`LedgerError::InvalidAmount`] for a bad amount under [`AmountPolicy::Fail`].
pub fn normalize_row(record: &RawRecord, options: &NormalizeOptions) -> Result<NormalizedRow> {
    let account = required(record, GL_ACCOUNT)?.trim().to_string();
    let month = parse_month(required(record, GL_MONTH)?)?;
    let year = parse_year(record.get(GL_YEAR).unwrap_or(""))?;
    let group = strip_accents(record.get(GL_GROUP).unwrap_or("").trim());
    let transaction_date = parse_date(required(record, TRANSACTION_DATE)?)?;
    let job_number = required(record, JOB_NUMBER)?.trim().to_string();

    let mut warnings = Vec::new();
    let debit = amount_field(record, DEBIT_AMOUNT, options, &mut warnings)?;
    let credit = amount_field(record, CREDIT_AMOUNT, options, &mut warnings)?;

    let line = CanonicalLine {
        account,
        note: provision_note(month),
        month,
        year,
        group,
        transaction_date,
        reference: provision_reference(month, year),
        debit,
        credit,
        job_number,
    };
    Ok(NormalizedRow { line, warnings })
}

/// Normalizes every record, failing on the first bad row.
///
/// Errors are tagged with the 1-based data row number.
pub fn normalize_rows(records: &[RawRecord], options: &NormalizeOptions) -> Result<NormalizedBatch> {
    let mut batch = NormalizedBatch {
        lines: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
    };
    for (idx, record) in records.iter().enumerate() {
        let row = idx + 1;
        let NormalizedRow { line, warnings } =
            normalize_row(record, options).map_err(|err| err.at_row(row))?;
        for mut warning in warnings {
            warning.row = row;
            warn!(row, field = %warning.field, "amount not recognized, using 0.00");
            batch.warnings.push(warning);
        }
        batch.lines.push(line);
    }
    debug!(
        lines = batch.lines.len(),
        degraded_amounts = batch.warnings.len(),
        "rows normalized"
    );
    Ok(batch)
}

fn required<'a>(record: &'a RawRecord, field: &str) -> Result<&'a str> {
    record
        .get(field)
        .ok_or_else(|| LedgerError::validation(field, "missing required field"))
}

/// Integral part of a numeric cell, the way spreadsheets hand out `3.0`.
fn parse_integral(value: &str) -> Option<i64> {
    let number = value.trim().parse::<f64>().ok()?;
    if !number.is_finite() || number.abs() > i32::MAX as f64 {
        return None;
    }
    Some(number.trunc() as i64)
}

fn parse_month(value: &str) -> Result<Month> {
    let number = parse_integral(value).ok_or_else(|| {
        LedgerError::validation(GL_MONTH, format!("not a number: '{}'", value.trim()))
    })?;
    u32::try_from(number)
        .ok()
        .and_then(Month::new)
        .ok_or_else(|| {
            LedgerError::validation(GL_MONTH, format!("out of range (1-12): '{}'", value.trim()))
        })
}

fn parse_year(value: &str) -> Result<Option<i32>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_integral(value)
        .and_then(|year| i32::try_from(year).ok())
        .map(Some)
        .ok_or_else(|| LedgerError::validation(GL_YEAR, format!("not a number: '{}'", value.trim())))
}

fn amount_field(
    record: &RawRecord,
    field: &str,
    options: &NormalizeOptions,
    warnings: &mut Vec<AmountWarning>,
) -> Result<Amount> {
    let raw = record.get(field).unwrap_or("");
    match parse_amount(raw, options.amount_dialect) {
        Ok(amount) => Ok(amount),
        Err(invalid) => match options.amount_policy {
            AmountPolicy::Fail => Err(LedgerError::InvalidAmount {
                field: field.to_string(),
                value: invalid.value,
            }),
            AmountPolicy::Silent => Ok(Amount::zero()),
            AmountPolicy::Warn => {
                warnings.push(AmountWarning {
                    row: 0,
                    field: field.to_string(),
                    value: invalid.value,
                });
                Ok(Amount::zero())
            }
        },
    }
}
