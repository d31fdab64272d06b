//! Offset line generation.
//!
//! Credited lines on production accounts (codes starting with `8`) are
//! balanced by debit lines on the configured offset account. The
//! [`Aggregation`] policy decides how many offset lines are produced.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use ledger_model::{Aggregation, Amount, CanonicalLine, GenerationConfig, LedgerError, Result};
use ledger_transform::{provision_note, provision_reference, strip_accents};

/// Account prefix of lines that receive offsets.
const PRODUCTION_ACCOUNT_PREFIX: char = '8';

/// True for a production account line with a strictly positive credit.
pub fn is_offset_eligible(line: &CanonicalLine) -> bool {
    line.account.trim().starts_with(PRODUCTION_ACCOUNT_PREFIX) && line.credit.is_positive()
}

/// Appends offset lines to `lines`.
///
/// The input lines are kept unchanged and in order; offsets follow them.
/// When offsets are disabled the lines pass through as they are.
///
/// # Errors
///
/// [`LedgerError::Configuration`] when the configuration cannot produce an
/// offset line, [`LedgerError::AmountOverflow`] when a credit sum does not
/// fit two fraction digits.
pub fn generate_offsets(
    mut lines: Vec<CanonicalLine>,
    config: &GenerationConfig,
) -> Result<Vec<CanonicalLine>> {
    if !config.generate_offsets {
        return Ok(lines);
    }
    config.validate()?;
    let offsets = offset_lines(&lines, config)?;
    lines.extend(offsets);
    Ok(lines)
}

/// Builds only the offset lines for `lines` under `config.aggregation`.
///
/// # Errors
///
/// [`LedgerError::AmountOverflow`] when a credit sum does not fit two
/// fraction digits.
pub fn offset_lines(
    lines: &[CanonicalLine],
    config: &GenerationConfig,
) -> Result<Vec<CanonicalLine>> {
    let account = config.offset_account.trim();
    let eligible: Vec<&CanonicalLine> = lines.iter().filter(|l| is_offset_eligible(l)).collect();
    debug!(
        eligible = eligible.len(),
        aggregation = %config.aggregation,
        "selecting offset lines"
    );

    match config.aggregation {
        Aggregation::None => Ok(eligible
            .iter()
            .map(|line| line.to_offset(account, line.credit))
            .collect()),
        Aggregation::Total => Ok(total_offset(&eligible, account, config)?
            .into_iter()
            .collect()),
        Aggregation::ByReference => partitioned(&eligible, account, |line| &line.reference),
        Aggregation::ByJob => partitioned(&eligible, account, |line| &line.job_number),
    }
}

fn credit_sum(lines: &[&CanonicalLine]) -> Result<Amount> {
    Amount::checked_sum(lines.iter().map(|line| line.credit)).ok_or_else(|| {
        LedgerError::AmountOverflow {
            context: "offset credit sum".to_string(),
        }
    })
}

fn total_offset(
    eligible: &[&CanonicalLine],
    account: &str,
    config: &GenerationConfig,
) -> Result<Option<CanonicalLine>> {
    let Some(first) = eligible.first() else {
        return Ok(None);
    };
    let mut offset = first.to_offset(account, credit_sum(eligible)?);
    offset.note = match &config.offset_note {
        Some(note) if !note.trim().is_empty() => strip_accents(note.trim()),
        _ => provision_note(first.month),
    };
    offset.reference = match &config.offset_reference {
        Some(reference) if !reference.trim().is_empty() => strip_accents(reference.trim()),
        _ => provision_reference(first.month, first.year),
    };
    Ok(Some(offset))
}

/// One offset per distinct key, in first-seen key order.
fn partitioned<'a, F>(
    eligible: &[&'a CanonicalLine],
    account: &str,
    key: F,
) -> Result<Vec<CanonicalLine>>
where
    F: Fn(&'a CanonicalLine) -> &'a String,
{
    let mut positions: HashMap<&'a String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&'a CanonicalLine>> = Vec::new();
    for &line in eligible {
        match positions.entry(key(line)) {
            Entry::Occupied(slot) => groups[*slot.get()].push(line),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(vec![line]);
            }
        }
    }
    groups
        .iter()
        .map(|members| Ok(members[0].to_offset(account, credit_sum(members)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ledger_model::Month;

    use super::*;

    fn line(account: &str, credit_cents: i64, reference: &str, job: &str) -> CanonicalLine {
        CanonicalLine {
            account: account.to_string(),
            note: "Provision Marzo".to_string(),
            month: Month::new(3).unwrap(),
            year: Some(2024),
            group: String::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            reference: reference.to_string(),
            debit: Amount::zero(),
            credit: Amount::from_cents(credit_cents),
            job_number: job.to_string(),
        }
    }

    #[test]
    fn eligibility_boundaries() {
        assert!(!is_offset_eligible(&line("79999", 100, "r", "j")));
        assert!(!is_offset_eligible(&line("80000", 0, "r", "j")));
        assert!(is_offset_eligible(&line("80000", 1, "r", "j")));
        assert!(is_offset_eligible(&line(" 80000", 1, "r", "j")));
        assert!(!is_offset_eligible(&line("80000", -500, "r", "j")));
    }

    #[test]
    fn partitions_keep_first_seen_order() {
        let lines = vec![
            line("80001", 100, "B", "J2"),
            line("80002", 200, "A", "J1"),
            line("80003", 300, "B", "J1"),
        ];
        let config = GenerationConfig::default().with_aggregation(Aggregation::ByReference);
        let by_ref = offset_lines(&lines, &config).unwrap();
        assert_eq!(by_ref.len(), 2);
        assert_eq!(by_ref[0].reference, "B");
        assert_eq!(by_ref[0].debit, Amount::from_cents(400));
        assert_eq!(by_ref[0].job_number, "J2");
        assert_eq!(by_ref[1].reference, "A");

        let config = config.with_aggregation(Aggregation::ByJob);
        let by_job = offset_lines(&lines, &config).unwrap();
        assert_eq!(by_job.len(), 2);
        assert_eq!(by_job[0].job_number, "J2");
        assert_eq!(by_job[1].job_number, "J1");
        assert_eq!(by_job[1].debit, Amount::from_cents(500));
        assert_eq!(by_job[1].reference, "A");
    }

    #[test]
    fn total_without_eligible_lines_emits_nothing() {
        let lines = vec![line("70001", 100, "r", "j")];
        assert!(
            offset_lines(&lines, &GenerationConfig::default())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn total_overrides_are_accent_stripped() {
        let lines = vec![line("80001", 100, "r", "j")];
        let config = GenerationConfig::default().with_overrides(
            Some("Provisión (auto)".to_string()),
            Some(" Producción ".to_string()),
        );
        let offsets = offset_lines(&lines, &config).unwrap();
        assert_eq!(offsets[0].note, "Provision (auto)");
        assert_eq!(offsets[0].reference, "Produccion");
    }

    #[test]
    fn disabled_offsets_pass_lines_through() {
        let lines = vec![line("80001", 100, "r", "j")];
        let out = generate_offsets(lines.clone(), &GenerationConfig::default().without_offsets())
            .unwrap();
        assert_eq!(out, lines);
    }
}
