//! Date parsing for loosely formatted ledger exports.
//!
//! Accepted representations, tried in order with the first success winning:
//!
//! 1. Spreadsheet serial day counts relative to 1899-12-30
//! 2. Textual patterns: `D/M/Y`, `M/D/Y`, `Y-M-D`, `Y/M/D`, `D-M-Y`, `M-D-Y`,
//!    then the slash and ISO forms with a trailing `H:M:S`
//! 3. Packed `YYYYMMDD`
//!
//! Day-first wins for ambiguous values such as `3/4/2024` (3 April).

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use ledger_model::{DateOrder, LedgerError, Result};

const DATE_PATTERNS: [&str; 6] = [
    "%d/%m/%Y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m-%d-%Y",
];

const DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Serial day counts beyond this cannot land inside years 1..=9999.
const MAX_SERIAL_DAYS: f64 = 3_700_000.0;

fn serial_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// Parses a date cell into a calendar date.
///
/// # Errors
///
/// [`LedgerError::EmptyDate`] for blank input, [`LedgerError::DateFormat`]
/// carrying the trimmed input when no representation matches.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyDate);
    }
    let cleaned = clean_date_text(trimmed);
    parse_serial(cleaned.as_str())
        .or_else(|| parse_patterns(cleaned.as_str()))
        .or_else(|| parse_packed(cleaned.as_str()))
        .ok_or_else(|| LedgerError::DateFormat {
            value: trimmed.to_string(),
        })
}

/// Replaces the ISO `T` separator and drops any sub-second fraction.
fn clean_date_text(value: &str) -> String {
    let replaced = value.replace('T', " ");
    match replaced.split_once('.') {
        Some((head, _)) => head.to_string(),
        None => replaced,
    }
}

fn parse_serial(value: &str) -> Option<NaiveDate> {
    let number = value.parse::<f64>().ok()?;
    if !number.is_finite() || number.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let days = TimeDelta::try_days(number.floor() as i64)?;
    let date = serial_epoch()?.checked_add_signed(days)?;
    is_supported_year(date).then_some(date)
}

fn parse_patterns(value: &str) -> Option<NaiveDate> {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
        .or_else(|| {
            DATETIME_PATTERNS.iter().find_map(|pattern| {
                NaiveDateTime::parse_from_str(value, pattern)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
        .filter(|date| has_four_digit_year(*date))
}

fn parse_packed(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn is_supported_year(date: NaiveDate) -> bool {
    (1..=9999).contains(&date.year())
}

// Textual years must be written with four digits; "3/4/24" is not year 24.
fn has_four_digit_year(date: NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

/// Renders a date for the output file without zero padding.
pub fn render_date(date: NaiveDate, order: DateOrder) -> String {
    match order {
        DateOrder::DayFirst => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        DateOrder::MonthFirst => format!("{}/{}/{}", date.month(), date.day(), date.year()),
    }
}

/// ISO 8601 calendar date (`YYYY-MM-DD`), used between pipeline stages.
pub fn render_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn serial_two_is_first_of_1900() {
        assert_eq!(parse_date("2").unwrap(), ymd(1900, 1, 1));
    }

    #[test]
    fn serial_with_fraction_is_truncated() {
        assert_eq!(parse_date("45366").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_date("45366.75").unwrap(), ymd(2024, 3, 15));
    }

    #[test]
    fn day_first_wins_when_ambiguous() {
        assert_eq!(parse_date("3/4/2024").unwrap(), ymd(2024, 4, 3));
    }

    #[test]
    fn month_first_when_day_first_is_impossible() {
        assert_eq!(parse_date("12/31/2024").unwrap(), ymd(2024, 12, 31));
        assert_eq!(parse_date("03-15-2024").unwrap(), ymd(2024, 3, 15));
    }

    #[test]
    fn iso_with_time_and_fraction() {
        assert_eq!(
            parse_date("2024-03-15T10:20:30.123").unwrap(),
            ymd(2024, 3, 15)
        );
        assert_eq!(
            parse_date("15/03/2024 08:00:00").unwrap(),
            ymd(2024, 3, 15)
        );
        assert_eq!(
            parse_date("2024/03/15 23:59:59").unwrap(),
            ymd(2024, 3, 15)
        );
    }

    #[test]
    fn packed_digits() {
        assert_eq!(parse_date("20240315").unwrap(), ymd(2024, 3, 15));
        assert!(matches!(
            parse_date("20241315"),
            Err(LedgerError::DateFormat { .. })
        ));
    }

    #[test]
    fn empty_input_fails_before_parsing() {
        assert!(matches!(parse_date(""), Err(LedgerError::EmptyDate)));
        assert!(matches!(parse_date("   "), Err(LedgerError::EmptyDate)));
    }

    #[test]
    fn unrecognized_input_carries_value() {
        match parse_date(" mañana ") {
            Err(LedgerError::DateFormat { value }) => assert_eq!(value, "mañana"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(parse_date("3/4/24").is_err());
        assert!(parse_date("31/31/2024").is_err());
    }

    #[test]
    fn renders_without_padding() {
        let date = ymd(2024, 3, 5);
        assert_eq!(render_date(date, DateOrder::DayFirst), "5/3/2024");
        assert_eq!(render_date(date, DateOrder::MonthFirst), "3/5/2024");
        assert_eq!(render_iso_date(date), "2024-03-05");
    }
}
