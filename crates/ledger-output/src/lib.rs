//! Ledger file output.
//!
//! The accounting system imports UTF-8 text with one entry per line and ten
//! tab-separated fields, without a header row:
//!
//! `account, note, month, year, group, transaction_date, reference, debit,
//! credit, job_number`

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use ledger_model::{CanonicalLine, DateOrder};
use ledger_transform::render_date;

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "salida.txt";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write ledger file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders one line without its terminator.
pub fn render_line(line: &CanonicalLine, date_order: DateOrder) -> String {
    [
        line.account.clone(),
        line.note.clone(),
        line.month.to_string(),
        line.year_text(),
        line.group.clone(),
        render_date(line.transaction_date, date_order),
        line.reference.clone(),
        line.debit.to_string(),
        line.credit.to_string(),
        line.job_number.clone(),
    ]
    .join("\t")
}

/// Renders the whole ledger file; every line ends with `\n`.
pub fn render_ledger(lines: &[CanonicalLine], date_order: DateOrder) -> String {
    let mut text = String::new();
    for line in lines {
        // Writing into a String cannot fail.
        let _ = writeln!(text, "{}", render_line(line, date_order));
    }
    text
}

/// Renders the ledger and writes it with a single call.
pub fn write_ledger(
    path: &Path,
    lines: &[CanonicalLine],
    date_order: DateOrder,
) -> Result<(), OutputError> {
    let text = render_ledger(lines, date_order);
    std::fs::write(path, text.as_bytes()).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), lines = lines.len(), bytes = text.len(), "ledger written");
    Ok(())
}

/// `salida.txt` in the directory of `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(DEFAULT_OUTPUT_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME))
}
