//! Amount normalization.
//!
//! Amount cells arrive as free text from spreadsheets in several locales.
//! Two dialects are supported (see [`AmountDialect`]); both produce an exact
//! [`Amount`] at two fraction digits.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use ledger_model::{Amount, AmountDialect};

/// An amount cell that no dialect rule could turn into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid amount: '{value}'")]
pub struct InvalidAmount {
    pub value: String,
}

/// Parses an amount cell.
///
/// Blank cells and the `NA` token are zero, not errors.
pub fn parse_amount(value: &str, dialect: AmountDialect) -> Result<Amount, InvalidAmount> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
        return Ok(Amount::zero());
    }
    let compact: String = trimmed
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '\u{a0}')
        .collect();
    let canonical = match dialect {
        AmountDialect::Simple => compact.replace(',', ""),
        AmountDialect::Locale => resolve_separators(&compact),
    };
    parse_decimal(&canonical)
        .and_then(Amount::try_new)
        .ok_or_else(|| InvalidAmount {
            value: trimmed.to_string(),
        })
}

/// Formats an amount cell as a two-digit decimal string.
///
/// Never fails: anything unparsable becomes `"0.00"`.
pub fn format_amount(value: &str, dialect: AmountDialect) -> String {
    parse_amount(value, dialect)
        .unwrap_or_else(|_| Amount::zero())
        .to_string()
}

fn resolve_separators(value: &str) -> String {
    let comma = value.rfind(',');
    let dot = value.rfind('.');
    match (comma, dot) {
        // 1,234.56
        (Some(comma), Some(dot)) if dot > comma => value.replace(',', ""),
        // 1.234,56
        (Some(_), Some(_)) => value.replace('.', "").replace(',', "."),
        // 12,5
        (Some(_), None) if value.matches(',').count() == 1 => value.replace(',', "."),
        _ => value.to_string(),
    }
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    let (sign, body) = match value.as_bytes().first() {
        Some(b'-') => ("-", &value[1..]),
        Some(b'+') => ("", &value[1..]),
        _ => ("", value),
    };
    if body.is_empty() || body.starts_with(['-', '+']) {
        return None;
    }
    let mut digits = String::with_capacity(body.len() + 2);
    digits.push_str(sign);
    if body.starts_with('.') {
        digits.push('0');
    }
    digits.push_str(body);
    if body.ends_with('.') {
        digits.push('0');
    }
    if digits.contains(['e', 'E']) {
        Decimal::from_scientific(&digits).ok()
    } else {
        Decimal::from_str(&digits).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_na_are_zero() {
        for dialect in [AmountDialect::Simple, AmountDialect::Locale] {
            assert_eq!(format_amount("", dialect), "0.00");
            assert_eq!(format_amount("  ", dialect), "0.00");
            assert_eq!(format_amount("NA", dialect), "0.00");
            assert_eq!(format_amount("na", dialect), "0.00");
        }
    }

    #[test]
    fn simple_dialect_strips_commas() {
        assert_eq!(format_amount("1,234.5", AmountDialect::Simple), "1234.50");
        assert_eq!(format_amount("1,234", AmountDialect::Simple), "1234.00");
        assert_eq!(format_amount("150", AmountDialect::Simple), "150.00");
    }

    #[test]
    fn locale_dialect_detects_decimal_separator() {
        assert_eq!(format_amount("1.234,56", AmountDialect::Locale), "1234.56");
        assert_eq!(format_amount("1,234.56", AmountDialect::Locale), "1234.56");
        assert_eq!(format_amount("1234.56", AmountDialect::Locale), "1234.56");
        assert_eq!(format_amount("12,5", AmountDialect::Locale), "12.50");
        assert_eq!(format_amount("1 234,56", AmountDialect::Locale), "1234.56");
    }

    #[test]
    fn locale_dialect_rejects_repeated_lone_commas() {
        assert!(parse_amount("1,234,567", AmountDialect::Locale).is_err());
        assert_eq!(
            format_amount("1,234,567", AmountDialect::Simple),
            "1234567.00"
        );
    }

    #[test]
    fn invalid_text_degrades_to_zero() {
        assert_eq!(format_amount("abc", AmountDialect::Locale), "0.00");
        let err = parse_amount(" abc ", AmountDialect::Simple).unwrap_err();
        assert_eq!(err.value, "abc");
    }

    #[test]
    fn accepts_signs_bare_points_and_exponents() {
        assert_eq!(format_amount("-5", AmountDialect::Simple), "-5.00");
        assert_eq!(format_amount("+5", AmountDialect::Simple), "5.00");
        assert_eq!(format_amount(".5", AmountDialect::Simple), "0.50");
        assert_eq!(format_amount("5.", AmountDialect::Simple), "5.00");
        assert_eq!(format_amount("1.5e2", AmountDialect::Simple), "150.00");
        assert_eq!(format_amount("--5", AmountDialect::Simple), "0.00");
    }

    #[test]
    fn values_too_large_for_cents_are_invalid() {
        assert!(parse_amount("79228162514264337593543950335", AmountDialect::Simple).is_err());
        assert!(parse_amount("50000000000000000000000000000", AmountDialect::Locale).is_err());
        assert_eq!(format_amount("9e40", AmountDialect::Simple), "0.00");
    }

    #[test]
    fn rounds_to_two_digits() {
        assert_eq!(format_amount("0.125", AmountDialect::Simple), "0.13");
        assert_eq!(format_amount("2.004", AmountDialect::Locale), "2.00");
    }
}
