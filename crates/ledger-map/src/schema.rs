//! Schema resolution.

use ledger_model::{ALTERNATE_COLUMNS, AlternateColumn, CANONICAL_COLUMNS, LedgerError, Result};
use ledger_transform::match_key;

/// Positions of the alternate-schema columns inside a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub code: usize,
    pub month: usize,
    pub date: usize,
    pub sale: usize,
    pub job: usize,
}

impl ColumnIndex {
    /// Locates every alternate column, matching headers after trimming,
    /// accent stripping and lowercasing.
    ///
    /// # Errors
    ///
    /// [`LedgerError::MissingColumns`] listing each absent column by its
    /// display name.
    pub fn locate(headers: &[String]) -> Result<Self> {
        let keys: Vec<String> = headers.iter().map(|h| match_key(h)).collect();
        let found = ALTERNATE_COLUMNS
            .map(|column| keys.iter().position(|k| k == column.match_key()));
        if let [Some(code), Some(month), Some(date), Some(sale), Some(job)] = found {
            return Ok(Self {
                code,
                month,
                date,
                sale,
                job,
            });
        }
        let missing = ALTERNATE_COLUMNS
            .iter()
            .zip(found)
            .filter(|(_, position)| position.is_none())
            .map(|(column, _)| column.display_name().to_string())
            .collect();
        Err(LedgerError::MissingColumns { columns: missing })
    }

    pub fn position(&self, column: AlternateColumn) -> usize {
        match column {
            AlternateColumn::Code => self.code,
            AlternateColumn::Month => self.month,
            AlternateColumn::Date => self.date,
            AlternateColumn::Sale => self.sale,
            AlternateColumn::Job => self.job,
        }
    }
}

/// The layout of a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSchema {
    /// All eight canonical columns are present.
    Canonical,
    /// Sales export layout that must be remapped first.
    Alternate(ColumnIndex),
}

impl InputSchema {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Alternate(_) => "alternate",
        }
    }
}

/// Decides which schema a header row uses.
///
/// Canonical column names must match exactly after trimming. When any of them
/// is absent the alternate layout is required.
pub fn resolve_schema(headers: &[String]) -> Result<InputSchema> {
    let is_canonical = CANONICAL_COLUMNS
        .iter()
        .all(|column| headers.iter().any(|h| h.trim() == *column));
    if is_canonical {
        return Ok(InputSchema::Canonical);
    }
    ColumnIndex::locate(headers).map(InputSchema::Alternate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn canonical_headers_win() {
        let mut names = CANONICAL_COLUMNS.to_vec();
        names.push("Código");
        assert_eq!(
            resolve_schema(&headers(&names)).unwrap(),
            InputSchema::Canonical
        );
    }

    #[test]
    fn alternate_headers_match_loosely() {
        let schema =
            resolve_schema(&headers(&[" TRABAJO", "codigo", "Mes", "fecha ", "Venta"])).unwrap();
        let InputSchema::Alternate(index) = schema else {
            panic!("expected alternate schema");
        };
        assert_eq!(index.code, 1);
        assert_eq!(index.job, 0);
        assert_eq!(index.position(AlternateColumn::Date), 3);
    }

    #[test]
    fn missing_alternate_columns_are_all_listed() {
        let err = resolve_schema(&headers(&["Código", "Fecha", "Trabajo"])).unwrap_err();
        match err {
            LedgerError::MissingColumns { columns } => assert_eq!(columns, ["Mes", "Venta"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
