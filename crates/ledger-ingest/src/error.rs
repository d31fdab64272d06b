//! Error types for ledger input loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading an input file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file bytes.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited text could not be tokenized.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or its first sheet read.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// No non-empty row was found.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// The extension is not one of the supported input formats.
    #[error("unsupported input format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("ventas.pdf"),
            extension: "pdf".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported input format 'pdf': ventas.pdf");
    }
}
