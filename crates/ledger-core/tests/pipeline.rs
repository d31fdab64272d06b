//! End-to-end runs over decoded tables.

use ledger_core::{RunOptions, run};
use ledger_map::InputSchema;
use ledger_model::{
    Aggregation, AmountPolicy, CANONICAL_COLUMNS, GenerationConfig, LedgerError, NormalizeOptions,
    SourceTable,
};

fn table(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
    SourceTable::new(
        headers.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    )
}

fn canonical(rows: &[&[&str]]) -> SourceTable {
    table(&CANONICAL_COLUMNS, rows)
}

#[test]
fn canonical_input_with_total_offset() {
    let input = canonical(&[&[
        "80001",
        "3",
        "2024",
        "",
        "15/03/2024",
        "0",
        "150.00",
        "J1",
    ]]);
    let report = run(&input, &RunOptions::default()).expect("run");
    assert_eq!(report.schema, InputSchema::Canonical);
    assert!(report.mapping.is_none());
    assert_eq!(report.source_lines, 1);
    assert_eq!(report.offset_lines, 1);
    assert_eq!(report.lines[1].account, "1300102.5");
    assert_eq!(report.lines[1].debit.to_string(), "150.00");
    assert_eq!(report.totals.difference.to_string(), "0.00");
    assert!(report.is_balanced());
}

#[test]
fn alternate_input_is_remapped() {
    let input = table(
        &["Código", "Mes", "Fecha", "Venta", "Trabajo"],
        &[
            &["80001", "marzo", "15/03/2024", "1.234,50", "J1"],
            &["80002", "Marzo", "45366", "100", "J2"],
        ],
    );
    let options = RunOptions {
        generation: GenerationConfig::default().with_aggregation(Aggregation::ByJob),
        ..RunOptions::default()
    };
    let report = run(&input, &options).expect("run");
    assert!(matches!(report.schema, InputSchema::Alternate(_)));
    assert!(report.mapping.is_some());
    assert_eq!(report.source_lines, 2);
    assert_eq!(report.offset_lines, 2);
    assert_eq!(report.lines[0].month.number(), 3);
    assert_eq!(report.lines[0].credit.to_string(), "1234.50");
    assert_eq!(report.lines[1].year, Some(2024));
    assert_eq!(report.totals.credit.to_string(), "1334.50");
    assert!(report.is_balanced());
}

#[test]
fn missing_alternate_column_is_reported() {
    let input = table(&["Código", "Mes", "Fecha", "Trabajo"], &[]);
    match run(&input, &RunOptions::default()).unwrap_err() {
        LedgerError::MissingColumns { columns } => assert_eq!(columns, ["Venta"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn row_errors_carry_row_numbers() {
    let input = canonical(&[
        &["80001", "3", "2024", "", "15/03/2024", "0", "1", "J1"],
        &["80001", "13", "2024", "", "15/03/2024", "0", "1", "J1"],
    ]);
    let err = run(&input, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, LedgerError::Row { row: 2, .. }));
}

#[test]
fn unbalanced_without_offsets() {
    let input = canonical(&[&[
        "80001",
        "3",
        "2024",
        "",
        "2024-03-15",
        "0",
        "500",
        "J1",
    ]]);
    let options = RunOptions {
        generation: GenerationConfig::default().without_offsets(),
        ..RunOptions::default()
    };
    let report = run(&input, &options).expect("run");
    assert_eq!(report.offset_lines, 0);
    assert_eq!(report.totals.difference.to_string(), "-500.00");
    assert!(!report.is_balanced());
}

#[test]
fn amount_policy_reaches_the_run() {
    let rows: &[&[&str]] = &[&["80001", "3", "2024", "", "15/03/2024", "0", "n/a", "J1"]];

    let report = run(&canonical(rows), &RunOptions::default()).expect("run");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row, 1);
    assert_eq!(report.offset_lines, 0);

    let strict = RunOptions {
        normalize: NormalizeOptions::default().with_policy(AmountPolicy::Fail),
        ..RunOptions::default()
    };
    let err = run(&canonical(rows), &strict).unwrap_err();
    assert!(matches!(err.root(), LedgerError::InvalidAmount { .. }));
}

fn sales_with_bad_venta() -> SourceTable {
    table(
        &["Código", "Mes", "Fecha", "Venta", "Trabajo"],
        &[
            &["80001", "marzo", "15/03/2024", "100", "J1"],
            &["80002", "marzo", "16/03/2024", "abc", "J2"],
        ],
    )
}

#[test]
fn amount_policy_applies_to_the_alternate_layout() {
    let report = run(&sales_with_bad_venta(), &RunOptions::default()).expect("run");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row, 2);
    assert_eq!(report.warnings[0].value, "abc");
    assert_eq!(report.lines[1].credit.to_string(), "0.00");

    let strict = RunOptions {
        normalize: NormalizeOptions::default().with_policy(AmountPolicy::Fail),
        ..RunOptions::default()
    };
    let err = run(&sales_with_bad_venta(), &strict).unwrap_err();
    assert!(matches!(err, LedgerError::Row { row: 2, .. }));
    assert!(matches!(err.root(), LedgerError::InvalidAmount { value, .. } if value == "abc"));
}

#[test]
fn silent_policy_reports_nothing() {
    let silent = RunOptions {
        normalize: NormalizeOptions::default().with_policy(AmountPolicy::Silent),
        ..RunOptions::default()
    };
    let report = run(&sales_with_bad_venta(), &silent).expect("run");
    assert!(report.warnings.is_empty());
    assert_eq!(report.totals.credit.to_string(), "100.00");
}

#[test]
fn oversized_amount_is_rejected_under_fail() {
    let rows: &[&[&str]] = &[&[
        "80001",
        "3",
        "2024",
        "",
        "15/03/2024",
        "0",
        "79228162514264337593543950335",
        "J1",
    ]];
    let strict = RunOptions {
        normalize: NormalizeOptions::default().with_policy(AmountPolicy::Fail),
        ..RunOptions::default()
    };
    let err = run(&canonical(rows), &strict).unwrap_err();
    assert!(matches!(err.root(), LedgerError::InvalidAmount { .. }));
}
