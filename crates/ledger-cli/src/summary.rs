use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ledger_cli::generate::GenerateOutcome;
use ledger_cli::logging::redact_value;
use ledger_ingest::AgencyDirectory;
use ledger_map::MappingReport;
use ledger_transform::AmountWarning;

pub fn print_summary(outcome: &GenerateOutcome) {
    let report = &outcome.report;
    println!("Schema: {}", report.schema.label());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    if let Some(mapping) = &report.mapping {
        print_mapping(mapping);
    }
    if !report.warnings.is_empty() {
        print_warnings(&report.warnings);
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source lines"), Cell::new(report.source_lines)]);
    table.add_row(vec![Cell::new("Offset lines"), count_cell(report.offset_lines)]);
    table.add_row(vec![
        Cell::new("Amount warnings"),
        warning_cell(report.warnings.len()),
    ]);
    table.add_row(vec![Cell::new("Total debit"), Cell::new(report.totals.debit)]);
    table.add_row(vec![Cell::new("Total credit"), Cell::new(report.totals.credit)]);
    table.add_row(vec![
        Cell::new("Difference"),
        Cell::new(report.totals.difference),
    ]);
    table.add_row(vec![Cell::new("Balanced"), balance_cell(report.is_balanced())]);
    println!("{table}");
}

fn print_mapping(mapping: &MappingReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Source")]);
    apply_table_style(&mut table);
    for entry in &mapping.entries {
        table.add_row(vec![Cell::new(entry.target), Cell::new(&entry.source)]);
    }
    println!("{table}");
}

fn print_warnings(warnings: &[AmountWarning]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(warning.row),
            Cell::new(&warning.field),
            dim_cell(redact_value(&warning.value)),
        ]);
    }
    println!("Amounts replaced with 0.00:");
    println!("{table}");
}

pub fn print_agencies(directory: &AgencyDirectory) {
    match directory.source() {
        Some(path) => println!("Agency table: {}", path.display()),
        None => {
            println!("No agency table found");
            return;
        }
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Agency"), header_cell("Account")]);
    apply_table_style(&mut table);
    for (agency, account) in directory.iter() {
        table.add_row(vec![Cell::new(agency), Cell::new(account)]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn warning_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn balance_cell(balanced: bool) -> Cell {
    if balanced {
        Cell::new("yes")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("NO").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
