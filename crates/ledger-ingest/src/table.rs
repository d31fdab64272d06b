//! Format dispatch and table assembly.

use std::path::Path;

use tracing::{debug, info};

use ledger_model::SourceTable;

use crate::error::{IngestError, Result};

/// Input file formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    DelimitedText,
    Spreadsheet,
}

impl InputFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Ok(Self::DelimitedText),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Reads an input file into a string table.
///
/// The first non-empty row becomes the header row. Fully empty rows are
/// dropped and short rows are padded to the header width.
pub fn read_table(path: &Path) -> Result<SourceTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = InputFormat::from_path(path)?;
    let raw_rows = match format {
        InputFormat::DelimitedText => crate::delimited::read_rows(path)?,
        InputFormat::Spreadsheet => crate::spreadsheet::read_rows(path)?,
    };
    let table = assemble_table(raw_rows).ok_or_else(|| IngestError::EmptyFile {
        path: path.to_path_buf(),
    })?;
    info!(
        path = %path.display(),
        format = ?format,
        columns = table.headers.len(),
        rows = table.len(),
        "input loaded"
    );
    Ok(table)
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}

/// Builds a table from raw rows; `None` when every row is blank.
pub(crate) fn assemble_table(raw_rows: Vec<Vec<String>>) -> Option<SourceTable> {
    let mut rows = raw_rows.into_iter().filter(|row| !is_blank_row(row));
    let headers: Vec<String> = rows.next()?.iter().map(|h| normalize_header(h)).collect();
    let width = headers.len();
    let mut truncated = 0usize;
    let body: Vec<Vec<String>> = rows
        .map(|mut row| {
            if row.len() > width {
                truncated += 1;
            }
            row.resize(width, String::new());
            row
        })
        .collect();
    if truncated > 0 {
        debug!(rows = truncated, "cells beyond the header width ignored");
    }
    Some(SourceTable::new(headers, body))
}
