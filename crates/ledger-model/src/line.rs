//! The canonical ledger line.

use std::fmt;

use chrono::NaiveDate;

use crate::amount::Amount;

const MONTH_NAMES_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// A calendar month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u32);

impl Month {
    /// Returns `None` outside `1..=12`.
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Spanish month name, capitalized (e.g. `Marzo`).
    pub fn name_es(self) -> &'static str {
        MONTH_NAMES_ES[(self.0 - 1) as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ledger entry in the accounting system's fixed schema.
///
/// Built by the row normalizer or synthesized by the offset generator and
/// never mutated afterwards. `note`, `group` and `reference` are stored
/// without diacritics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLine {
    pub account: String,
    pub note: String,
    pub month: Month,
    /// Absent when the source year cell was blank.
    pub year: Option<i32>,
    pub group: String,
    pub transaction_date: NaiveDate,
    pub reference: String,
    pub debit: Amount,
    pub credit: Amount,
    pub job_number: String,
}

impl CanonicalLine {
    /// Year as rendered in output (empty when absent).
    pub fn year_text(&self) -> String {
        self.year.map(|year| year.to_string()).unwrap_or_default()
    }

    /// Builds a balancing debit line that copies every descriptive field.
    #[must_use]
    pub fn to_offset(&self, account: &str, debit: Amount) -> Self {
        Self {
            account: account.to_string(),
            debit,
            credit: Amount::zero(),
            ..self.clone()
        }
    }
}
