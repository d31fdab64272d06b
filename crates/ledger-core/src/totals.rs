//! Debit and credit totals.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use ledger_model::{Amount, CanonicalLine, LedgerError, Result};

/// Largest absolute difference still reported as balanced.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub debit: Amount,
    pub credit: Amount,
    /// `debit - credit`, signed.
    pub difference: Amount,
}

impl Totals {
    pub fn is_balanced(&self) -> bool {
        within_tolerance(self.difference.value())
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "debit {} / credit {} / difference {}",
            self.debit, self.credit, self.difference
        )
    }
}

/// Sums every debit and credit exactly.
///
/// # Errors
///
/// [`LedgerError::AmountOverflow`] when a total no longer fits two fraction
/// digits.
pub fn totals(lines: &[CanonicalLine]) -> Result<Totals> {
    let overflow = |context: &str| LedgerError::AmountOverflow {
        context: context.to_string(),
    };
    let debit = Amount::checked_sum(lines.iter().map(|line| line.debit))
        .ok_or_else(|| overflow("total debit"))?;
    let credit = Amount::checked_sum(lines.iter().map(|line| line.credit))
        .ok_or_else(|| overflow("total credit"))?;
    let difference = debit
        .checked_sub(credit)
        .ok_or_else(|| overflow("debit - credit"))?;
    Ok(Totals {
        debit,
        credit,
        difference,
    })
}

/// `|difference| <= 0.01`.
pub fn within_tolerance(difference: Decimal) -> bool {
    difference.abs() <= BALANCE_TOLERANCE
}
