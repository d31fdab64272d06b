//! Spreadsheet decoding (first worksheet only).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Integral floats below this magnitude render without a fraction.
const INTEGRAL_LIMIT: f64 = 1e15;

/// Renders one cell as the string a delimited export would contain.
///
/// Dates become spreadsheet serial numbers so the date parser sees the same
/// representation regardless of the source format.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(number) => format_number(*number),
        Data::Int(number) => number.to_string(),
        Data::Bool(flag) => String::from(if *flag { "TRUE" } else { "FALSE" }),
        Data::DateTime(value) => format_number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < INTEGRAL_LIMIT {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook =
        open_workbook_auto(path).map_err(|err| spreadsheet_error(err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| spreadsheet_error("workbook contains no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| spreadsheet_error(format!("sheet '{sheet_name}': {err}")))?;
    debug!(sheet = %sheet_name, size = ?range.get_size(), "worksheet loaded");
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}
