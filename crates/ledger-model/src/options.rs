//! Configuration options for a generation run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Account that receives offsets when no other account is configured.
pub const DEFAULT_OFFSET_ACCOUNT: &str = "1300102.5";

/// Order of day and month when rendering dates in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `D/M/Y`
    #[default]
    DayFirst,
    /// `M/D/Y`
    MonthFirst,
}

/// How separators inside amount cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountDialect {
    /// Commas are grouping characters and are removed.
    Simple,
    /// The rightmost of `,`/`.` is the decimal point; a lone comma is decimal.
    #[default]
    Locale,
}

/// What happens when an amount cell cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountPolicy {
    /// Coerce to `0.00` without notice.
    Silent,
    /// Coerce to `0.00` and report the cell.
    #[default]
    Warn,
    /// Abort the run.
    Fail,
}

/// Options for turning raw records into canonical lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub date_order: DateOrder,
    pub amount_dialect: AmountDialect,
    pub amount_policy: AmountPolicy,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: AmountDialect) -> Self {
        self.amount_dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AmountPolicy) -> Self {
        self.amount_policy = policy;
        self
    }
}

/// Grouping policy for offset lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// One mirrored offset per eligible line.
    None,
    /// A single offset for the whole run.
    #[default]
    Total,
    /// One offset per distinct reference.
    ByReference,
    /// One offset per distinct job number.
    ByJob,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Total => "total",
            Self::ByReference => "by_ref",
            Self::ByJob => "by_job",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "total" => Ok(Self::Total),
            "by_ref" | "by-ref" | "byref" | "by_reference" | "by-reference" | "byreference" => {
                Ok(Self::ByReference)
            }
            "by_job" | "by-job" | "byjob" => Ok(Self::ByJob),
            other => Err(LedgerError::Configuration(format!(
                "unknown aggregation policy '{other}' (expected none, total, by_ref, by_job)"
            ))),
        }
    }
}

/// Configuration governing one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Ledger account credited lines are balanced against.
    pub offset_account: String,
    pub aggregation: Aggregation,
    /// Note override, only honored by [`Aggregation::Total`].
    pub offset_note: Option<String>,
    /// Reference override, only honored by [`Aggregation::Total`].
    pub offset_reference: Option<String>,
    pub generate_offsets: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            offset_account: DEFAULT_OFFSET_ACCOUNT.to_string(),
            aggregation: Aggregation::default(),
            offset_note: None,
            offset_reference: None,
            generate_offsets: true,
        }
    }
}

impl GenerationConfig {
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_offset_account(mut self, account: impl Into<String>) -> Self {
        self.offset_account = account.into();
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, note: Option<String>, reference: Option<String>) -> Self {
        self.offset_note = note;
        self.offset_reference = reference;
        self
    }

    #[must_use]
    pub fn without_offsets(mut self) -> Self {
        self.generate_offsets = false;
        self
    }

    /// Rejects configurations that cannot produce a usable offset line.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.generate_offsets && self.offset_account.trim().is_empty() {
            return Err(LedgerError::Configuration(
                "offset account must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
