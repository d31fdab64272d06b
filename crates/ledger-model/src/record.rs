//! Raw input records and input schema column names.

use std::collections::BTreeMap;

/// Canonical input column names.
pub mod columns {
    pub const GL_ACCOUNT: &str = "GL_Account";
    pub const GL_MONTH: &str = "GL_Month";
    pub const GL_YEAR: &str = "GL_Year";
    pub const GL_GROUP: &str = "GL_Group";
    pub const TRANSACTION_DATE: &str = "TransactionDate";
    pub const DEBIT_AMOUNT: &str = "DebitAmount";
    pub const CREDIT_AMOUNT: &str = "CreditAmount";
    pub const JOB_NUMBER: &str = "JobNumber";
}

/// The eight columns of the canonical schema.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    columns::GL_ACCOUNT,
    columns::GL_MONTH,
    columns::GL_YEAR,
    columns::GL_GROUP,
    columns::TRANSACTION_DATE,
    columns::DEBIT_AMOUNT,
    columns::CREDIT_AMOUNT,
    columns::JOB_NUMBER,
];

/// Source columns of the alternate (sales export) schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlternateColumn {
    Code,
    Month,
    Date,
    Sale,
    Job,
}

impl AlternateColumn {
    /// Column name as it appears in source files.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Code => "Código",
            Self::Month => "Mes",
            Self::Date => "Fecha",
            Self::Sale => "Venta",
            Self::Job => "Trabajo",
        }
    }

    /// Lowercase, accent-free key used for header matching.
    pub fn match_key(self) -> &'static str {
        match self {
            Self::Code => "codigo",
            Self::Month => "mes",
            Self::Date => "fecha",
            Self::Sale => "venta",
            Self::Job => "trabajo",
        }
    }
}

/// Required columns of the alternate schema, in reporting order.
pub const ALTERNATE_COLUMNS: [AlternateColumn; 5] = [
    AlternateColumn::Code,
    AlternateColumn::Month,
    AlternateColumn::Date,
    AlternateColumn::Sale,
    AlternateColumn::Job,
];

/// One decoded input row: field name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder form of [`RawRecord::insert`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A decoded table: trimmed headers plus string rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell at `(row, col)`, empty when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Converts every row into a record keyed by header.
    ///
    /// On duplicate headers the first column wins.
    pub fn records(&self) -> Vec<RawRecord> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = RawRecord::new();
                for (idx, header) in self.headers.iter().enumerate() {
                    if record.contains(header) {
                        continue;
                    }
                    let value = row.get(idx).map(String::as_str).unwrap_or("");
                    record.insert(header.clone(), value);
                }
                record
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_pad_short_rows_and_keep_first_duplicate() {
        let table = SourceTable::new(
            vec!["A".to_string(), "B".to_string(), "A".to_string()],
            vec![vec!["1".to_string()]],
        );
        let records = table.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("A"), Some("1"));
        assert_eq!(records[0].get("B"), Some(""));
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn record_collects_from_pairs() {
        let record: RawRecord = [("GL_Account", "80001"), ("JobNumber", "J1")]
            .into_iter()
            .collect();
        assert_eq!(record.get("GL_Account"), Some("80001"));
        assert!(!record.contains("GL_Month"));
    }
}
