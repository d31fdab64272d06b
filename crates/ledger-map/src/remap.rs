//! Alternate-schema remapping.

use std::fmt;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info};

use ledger_model::columns::{
    CREDIT_AMOUNT, DEBIT_AMOUNT, GL_ACCOUNT, GL_GROUP, GL_MONTH, GL_YEAR, JOB_NUMBER,
    TRANSACTION_DATE,
};
use ledger_model::{AlternateColumn, AmountDialect, LedgerError, RawRecord, Result, SourceTable};
use ledger_transform::{month_from_name_es, parse_amount, parse_date, render_iso_date};

use crate::schema::ColumnIndex;

/// One canonical field and where its value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub target: &'static str,
    pub source: String,
}

/// How canonical fields were derived from the alternate columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub entries: Vec<MappingEntry>,
}

impl MappingReport {
    fn for_index(headers: &[String], index: &ColumnIndex) -> Self {
        let header = |column: AlternateColumn| {
            headers
                .get(index.position(column))
                .map(|h| h.trim().to_string())
                .unwrap_or_else(|| column.display_name().to_string())
        };
        let entries = vec![
            (GL_ACCOUNT, header(AlternateColumn::Code)),
            (
                GL_MONTH,
                format!("{} (number or Spanish month name)", header(AlternateColumn::Month)),
            ),
            (GL_YEAR, format!("year of {}", header(AlternateColumn::Date))),
            (GL_GROUP, "(empty)".to_string()),
            (TRANSACTION_DATE, header(AlternateColumn::Date)),
            (DEBIT_AMOUNT, "0.00".to_string()),
            (CREDIT_AMOUNT, header(AlternateColumn::Sale)),
            (JOB_NUMBER, header(AlternateColumn::Job)),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(target, source)| MappingEntry { target, source })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for MappingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} <- {}", entry.target, entry.source)?;
        }
        Ok(())
    }
}

/// Rewrites an alternate-schema table into canonical records.
///
/// # Errors
///
/// [`LedgerError::MissingColumns`] when any alternate column is absent, or a
/// row-tagged validation error when a `Fecha` cell is not a date.
pub fn remap_columns(
    table: &SourceTable,
    dialect: AmountDialect,
) -> Result<(Vec<RawRecord>, MappingReport)> {
    let index = ColumnIndex::locate(&table.headers)?;
    remap_with_index(table, &index, dialect)
}

/// [`remap_columns`] with columns already located by schema resolution.
pub fn remap_with_index(
    table: &SourceTable,
    index: &ColumnIndex,
    dialect: AmountDialect,
) -> Result<(Vec<RawRecord>, MappingReport)> {
    let mut records = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let record = remap_row(table, index, row, dialect).map_err(|err| err.at_row(row + 1))?;
        records.push(record);
    }
    info!(rows = records.len(), "alternate columns remapped");
    Ok((records, MappingReport::for_index(&table.headers, index)))
}

fn remap_row(
    table: &SourceTable,
    index: &ColumnIndex,
    row: usize,
    dialect: AmountDialect,
) -> Result<RawRecord> {
    let cell = |column: AlternateColumn| table.cell(row, index.position(column)).trim();

    let date_text = cell(AlternateColumn::Date);
    let date = parse_date(date_text).map_err(|err| {
        LedgerError::validation(AlternateColumn::Date.display_name(), err.to_string())
    })?;

    Ok(RawRecord::new()
        .with(GL_ACCOUNT, cell(AlternateColumn::Code))
        .with(GL_MONTH, month_number(cell(AlternateColumn::Month)))
        .with(GL_YEAR, date.year().to_string())
        .with(GL_GROUP, "")
        .with(TRANSACTION_DATE, render_iso_date(date))
        .with(DEBIT_AMOUNT, "0.00")
        .with(CREDIT_AMOUNT, credit_text(cell(AlternateColumn::Sale), dialect))
        .with(JOB_NUMBER, cell(AlternateColumn::Job)))
}

/// Canonical text for a parsable sale amount. Anything else passes through
/// unchanged so the row normalizer applies the amount policy to it.
fn credit_text(value: &str, dialect: AmountDialect) -> String {
    match parse_amount(value, dialect) {
        Ok(amount) => amount.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Month cell as a number string: digits pass through, Spanish names are
/// looked up, anything else is left empty.
fn month_number(value: &str) -> String {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.to_string();
    }
    match month_from_name_es(value) {
        Some(month) => month.number().to_string(),
        None => {
            debug!("month cell not recognized, leaving it empty");
            String::new()
        }
    }
}
