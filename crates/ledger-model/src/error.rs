//! Error taxonomy for ledger generation.
//!
//! Every variant is terminal for the current run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The date cell was blank.
    #[error("empty date value")]
    EmptyDate,

    /// No accepted date representation matched.
    #[error("unrecognized date format: '{value}'")]
    DateFormat { value: String },

    /// A required field is absent or out of range.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Required source columns are absent from the input.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// The run configuration is not usable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An amount cell could not be parsed while the strict amount policy is active.
    #[error("invalid amount in {field}: '{value}'")]
    InvalidAmount { field: String, value: String },

    /// A sum of amounts no longer fits two fraction digits.
    #[error("amount total out of range: {context}")]
    AmountOverflow { context: String },

    /// A row-level failure, tagged with its 1-based data row number.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wraps this error with the data row it came from.
    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        Self::Row {
            row,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, unwrapping any row tags.
    pub fn root(&self) -> &LedgerError {
        match self {
            Self::Row { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
