//! One ledger generation run with explicit stages.
//!
//! 1. **Schema**: decide between the canonical and alternate layouts
//! 2. **Map**: remap alternate columns into canonical records
//! 3. **Normalize**: build canonical lines from records
//! 4. **Offsets**: append balancing lines per the aggregation policy
//! 5. **Totals**: sum debits and credits and check the balance
//!
//! The run is pure: reading the input and writing the output belong to the
//! caller, so a failed run never leaves partial output behind.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use ledger_map::{InputSchema, MappingReport, remap_with_index, resolve_schema};
use ledger_model::{
    CanonicalLine, GenerationConfig, NormalizeOptions, RawRecord, Result, SourceTable,
};
use ledger_transform::{AmountWarning, normalize_rows};

use crate::offsets::generate_offsets;
use crate::totals::{Totals, totals};

/// Everything that parameterizes a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub normalize: NormalizeOptions,
    pub generation: GenerationConfig,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub schema: InputSchema,
    /// Present when the alternate layout was remapped.
    pub mapping: Option<MappingReport>,
    /// Lines built from input rows.
    pub source_lines: usize,
    /// Lines synthesized by the offset generator.
    pub offset_lines: usize,
    /// Amount cells that were coerced to zero.
    pub warnings: Vec<AmountWarning>,
    /// Source lines followed by offset lines.
    pub lines: Vec<CanonicalLine>,
    pub totals: Totals,
}

impl RunReport {
    pub fn is_balanced(&self) -> bool {
        self.totals.is_balanced()
    }
}

/// Runs every stage over an already decoded table.
///
/// # Errors
///
/// The first stage error, unchanged. Row-level errors carry their 1-based
/// data row number.
pub fn run(table: &SourceTable, options: &RunOptions) -> Result<RunReport> {
    let run_span = info_span!("run", rows = table.len());
    let _guard = run_span.enter();
    let run_start = Instant::now();
    options.generation.validate()?;

    let schema = resolve_schema(&table.headers)?;
    debug!(schema = schema.label(), "input schema resolved");

    let (records, mapping) = info_span!("map").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let mapped = load_records(table, &schema, options)?;
        debug!(
            records = mapped.0.len(),
            duration_ms = start.elapsed().as_millis(),
            "records ready"
        );
        Ok(mapped)
    })?;

    let batch = info_span!("normalize").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let batch = normalize_rows(&records, &options.normalize)?;
        debug!(
            lines = batch.lines.len(),
            duration_ms = start.elapsed().as_millis(),
            "lines normalized"
        );
        Ok(batch)
    })?;
    let source_lines = batch.lines.len();

    let lines = info_span!("offsets").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let lines = generate_offsets(batch.lines, &options.generation)?;
        debug!(
            offsets = lines.len() - source_lines,
            aggregation = %options.generation.aggregation,
            duration_ms = start.elapsed().as_millis(),
            "offsets generated"
        );
        Ok(lines)
    })?;

    let totals = totals(&lines)?;
    if totals.is_balanced() {
        info!(%totals, "ledger balanced");
    } else {
        warn!(%totals, "ledger not balanced");
    }

    info!(
        schema = schema.label(),
        source_lines,
        offset_lines = lines.len() - source_lines,
        amount_warnings = batch.warnings.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunReport {
        schema,
        mapping,
        source_lines,
        offset_lines: lines.len() - source_lines,
        warnings: batch.warnings,
        lines,
        totals,
    })
}

fn load_records(
    table: &SourceTable,
    schema: &InputSchema,
    options: &RunOptions,
) -> Result<(Vec<RawRecord>, Option<MappingReport>)> {
    match schema {
        InputSchema::Canonical => Ok((table.records(), None)),
        InputSchema::Alternate(index) => {
            let (records, report) =
                remap_with_index(table, index, options.normalize.amount_dialect)?;
            Ok((records, Some(report)))
        }
    }
}
